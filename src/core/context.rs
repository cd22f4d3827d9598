//! Context windows: which messages belong to the conversation around a message.
//!
//! For a target message the window takes up to `min_neighbors` messages on
//! each side. When the floor is reached, it keeps growing outward one message
//! at a time while the next candidate is at most `max_gap` away from the
//! current edge of the window. Gaps are absolute, so messages with equal or
//! out-of-order timestamps count as close.
//!
//! ```text
//! index:   0     1     2  |  3  |  4     5     6
//!          ^--- gap <= max_gap ---^-- floor --^
//! window for 3 with min_neighbors = 1: extends back while gaps stay small
//! ```
//!
//! The target's own id sits between the backward and forward parts.

use std::fmt;
use std::ops::Range;

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

use crate::config::ContextConfig;
use crate::error::{ChatweaveError, Result};
use crate::message::EnrichedMessage;

/// The ordered ids forming one message's conversational neighborhood.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextSet {
    ids: Vec<u64>,
    target: usize,
}

impl ContextSet {
    fn from_window(messages: &[EnrichedMessage], window: Range<usize>, index: usize) -> Self {
        Self {
            target: index - window.start,
            ids: messages[window].iter().map(|m| m.id).collect(),
        }
    }

    /// Backward context, target and forward context, in transcript order.
    pub fn ids(&self) -> &[u64] {
        &self.ids
    }

    pub fn target_id(&self) -> u64 {
        self.ids[self.target]
    }

    /// Ids before the target.
    pub fn before(&self) -> &[u64] {
        &self.ids[..self.target]
    }

    /// Ids after the target.
    pub fn after(&self) -> &[u64] {
        &self.ids[self.target + 1..]
    }

    /// Number of ids including the target.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Always false: a context contains at least its target.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Comma-separated ids, e.g. `3,4,5`.
impl fmt::Display for ContextSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, id) in self.ids.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{id}")?;
        }
        Ok(())
    }
}

/// Computes context windows over an enriched transcript.
#[derive(Debug, Clone, Copy)]
pub struct ContextBuilder {
    min_neighbors: usize,
    max_gap: TimeDelta,
}

impl Default for ContextBuilder {
    fn default() -> Self {
        Self {
            min_neighbors: 5,
            max_gap: TimeDelta::minutes(30),
        }
    }
}

impl ContextBuilder {
    pub fn new(config: &ContextConfig) -> Result<Self> {
        config.validate()?;
        let max_gap = config
            .max_gap()
            .ok_or_else(|| ChatweaveError::invalid_config("max gap is out of range"))?;

        Ok(Self {
            min_neighbors: config.min_neighbors,
            max_gap,
        })
    }

    fn close(&self, a: &EnrichedMessage, b: &EnrichedMessage) -> bool {
        (a.timestamp - b.timestamp).abs() <= self.max_gap
    }

    /// Index range of the window around `index`, scanning outward.
    ///
    /// Returns `None` if `index` is out of bounds.
    pub fn window(&self, messages: &[EnrichedMessage], index: usize) -> Option<Range<usize>> {
        let last = messages.len().checked_sub(1)?;
        if index > last {
            return None;
        }

        let mut start = index.saturating_sub(self.min_neighbors);
        while start > 0 && self.close(&messages[start], &messages[start - 1]) {
            start -= 1;
        }

        let mut end = index.saturating_add(self.min_neighbors).min(last);
        while end < last && self.close(&messages[end], &messages[end + 1]) {
            end += 1;
        }

        Some(start..end + 1)
    }

    /// Context of a single message.
    pub fn context_for(&self, messages: &[EnrichedMessage], index: usize) -> Option<ContextSet> {
        let window = self.window(messages, index)?;
        Some(ContextSet::from_window(messages, window, index))
    }

    /// Contexts of every message, in order.
    ///
    /// Each message's chain of close neighbors is computed once, so the total
    /// cost is linear in the transcript plus the size of the output.
    pub fn build_all(&self, messages: &[EnrichedMessage]) -> Vec<ContextSet> {
        let Some(last) = messages.len().checked_sub(1) else {
            return Vec::new();
        };

        // chain_start[k]: earliest index reachable from k through close pairs.
        let mut chain_start = vec![0usize; messages.len()];
        for k in 1..=last {
            chain_start[k] = if self.close(&messages[k - 1], &messages[k]) {
                chain_start[k - 1]
            } else {
                k
            };
        }

        // chain_end[k]: latest index reachable from k through close pairs.
        let mut chain_end = vec![last; messages.len()];
        for k in (0..last).rev() {
            chain_end[k] = if self.close(&messages[k], &messages[k + 1]) {
                chain_end[k + 1]
            } else {
                k
            };
        }

        (0..messages.len())
            .map(|index| {
                let start = chain_start[index.saturating_sub(self.min_neighbors)];
                let end = chain_end[index.saturating_add(self.min_neighbors).min(last)];
                ContextSet::from_window(messages, start..end + 1, index)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    fn base() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2021, 6, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap()
    }

    /// Messages at the given minute offsets, ids 0..n.
    fn at_minutes(offsets: &[i64]) -> Vec<EnrichedMessage> {
        offsets
            .iter()
            .enumerate()
            .map(|(i, m)| EnrichedMessage::new(i as u64, "A", base() + TimeDelta::minutes(*m), ""))
            .collect()
    }

    fn builder() -> ContextBuilder {
        ContextBuilder::new(&ContextConfig::default()).unwrap()
    }

    #[test]
    fn test_empty_transcript() {
        assert!(builder().build_all(&[]).is_empty());
        assert!(builder().context_for(&[], 0).is_none());
    }

    #[test]
    fn test_single_message() {
        let messages = at_minutes(&[0]);
        let ctx = builder().context_for(&messages, 0).unwrap();
        assert_eq!(ctx.ids(), &[0]);
        assert!(ctx.before().is_empty());
        assert!(ctx.after().is_empty());
    }

    #[test]
    fn test_boundaries() {
        let messages = at_minutes(&[0, 1, 2, 3, 4, 5, 6, 7, 8, 9]);
        let all = builder().build_all(&messages);
        assert!(all[0].before().is_empty());
        assert!(all[9].after().is_empty());
        assert_eq!(all[0].target_id(), 0);
        assert_eq!(all[9].target_id(), 9);
    }

    #[test]
    fn test_floor_without_time_extension() {
        // Two hours between every message: only the floor applies.
        let offsets: Vec<i64> = (0..20).map(|i| i * 120).collect();
        let messages = at_minutes(&offsets);
        let ctx = builder().context_for(&messages, 10).unwrap();
        assert_eq!(ctx.before(), &[5, 6, 7, 8, 9]);
        assert_eq!(ctx.after(), &[11, 12, 13, 14, 15]);
    }

    #[test]
    fn test_fewer_than_floor_takes_all() {
        let offsets: Vec<i64> = (0..4).map(|i| i * 500).collect();
        let messages = at_minutes(&offsets);
        let ctx = builder().context_for(&messages, 2).unwrap();
        assert_eq!(ctx.ids(), &[0, 1, 2, 3]);
    }

    #[test]
    fn test_backward_extension_stops_at_large_gap() {
        // 0 --40min-- 1 --10-- 2 --10-- 3 --10-- 4 --10-- 5 --10-- 6 (target)
        let messages = at_minutes(&[0, 40, 50, 60, 70, 80, 90]);
        let ctx = builder().context_for(&messages, 6).unwrap();
        assert_eq!(ctx.before(), &[1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_backward_extension_follows_close_chain() {
        // floor reaches index 3; 0..3 are each 20 minutes apart
        let messages = at_minutes(&[0, 20, 40, 60, 300, 301, 302, 303, 304]);
        let ctx = builder().context_for(&messages, 8).unwrap();
        assert_eq!(ctx.before(), &[0, 1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn test_forward_extension() {
        let messages = at_minutes(&[0, 1, 2, 3, 4, 5, 35, 65, 200]);
        let ctx = builder().context_for(&messages, 0).unwrap();
        assert_eq!(ctx.after(), &[1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn test_exact_threshold_is_close() {
        let messages = at_minutes(&[0, 30, 31, 32, 33, 34, 35]);
        let ctx = builder().context_for(&messages, 6).unwrap();
        assert_eq!(ctx.before(), &[0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_out_of_order_timestamps_are_close() {
        let messages = at_minutes(&[100, 0, 0, 0, 0, 0, 0]);
        // 100 -> 0 is a 100 minute gap backwards in time
        let ctx = builder().context_for(&messages, 6).unwrap();
        assert_eq!(ctx.before(), &[1, 2, 3, 4, 5]);

        let messages = at_minutes(&[10, 5, 0, 0, 0, 0, 0]);
        let ctx = builder().context_for(&messages, 6).unwrap();
        assert_eq!(ctx.before(), &[0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_build_all_matches_single_scan() {
        let messages = at_minutes(&[0, 3, 50, 51, 52, 120, 121, 122, 123, 124, 125, 200, 201, 260]);
        let b = ContextBuilder::new(&ContextConfig::new().with_min_neighbors(2)).unwrap();
        let all = b.build_all(&messages);
        for (i, ctx) in all.iter().enumerate() {
            assert_eq!(Some(ctx), b.context_for(&messages, i).as_ref(), "index {i}");
        }
    }

    #[test]
    fn test_display_joins_ids() {
        let messages = at_minutes(&[0, 1, 2]);
        let ctx = builder().context_for(&messages, 1).unwrap();
        assert_eq!(ctx.to_string(), "0,1,2");
    }

    #[test]
    fn test_rejects_invalid_config() {
        let err = ContextBuilder::new(&ContextConfig::new().with_min_neighbors(0)).unwrap_err();
        assert!(err.is_invalid_config());
    }
}
