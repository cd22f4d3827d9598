//! Synthetic transcript generator for stress testing chatweave.
//!
//! Usage: cargo run --features gen-test --bin gen_transcript -- [chats] [messages] [output_dir]
//! Example: cargo run --features gen-test --bin gen_transcript -- 20 50000 stress_exports
//!
//! Writes `<output_dir>/chat_NNN/messages.txt` for every chat. Roughly half
//! of the referenced attachment files are created next to the transcript so
//! both present and missing media show up in the output.

use std::env;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::time::Instant;

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use rand::Rng;
use rand::seq::SliceRandom;

const AUTHORS: &[&str] = &[
    "Alice",
    "~Bob",
    "Иван",
    "村上",
    "محمد",
    "Dr. Jane Doe",
    "User;With;Semicolons",
    "🔥FireUser🔥",
];

const TEXTS: &[&str] = &[
    "Hi, how are you?",
    "a < b && c > d",
    "\"quoted\" and 'apostrophes'",
    "Кириллица: Привет мир!",
    "日本語: こんにちは",
    "Mixed: Hello Привет 你好 🌍",
    "<script>alert(1)</script>",
    "semicolons; here; and; there",
    "   ",
];

const LINKS: &[&str] = &[
    "https://example.com/path?q=1",
    "www.example.de",
    "ftp://files.example.org/a.zip",
    "http://localhost:8080",
];

const PLACES: &[(&str, f64, f64)] = &[
    ("Brandenburger Tor", 52.5163, 13.3777),
    ("Cape Town", -33.9249, 18.4241),
    ("Café <Zentral>", 48.2103, 16.3667),
];

const ATTACHMENTS: &[(&str, &str)] = &[
    ("Bild", "jpg"),
    ("Picture", "png"),
    ("Video", "mp4"),
    ("Audio", "m4a"),
    ("Datei", "pdf"),
];

fn main() -> io::Result<()> {
    let args: Vec<String> = env::args().collect();

    let chats: usize = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(10);
    let messages: usize = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(10_000);
    let output = args.get(3).map_or("stress_exports", String::as_str);

    println!("Synthetic transcript generator");
    println!("   Chats:    {chats}");
    println!("   Messages: {messages} per chat");
    println!("   Output:   {output}");

    let start = Instant::now();
    let mut rng = rand::thread_rng();
    let mut bytes_written = 0usize;

    for chat in 0..chats {
        let dir = Path::new(output).join(format!("chat_{chat:03}"));
        fs::create_dir_all(&dir)?;
        bytes_written += generate_chat(&mut rng, &dir, messages)?;
        eprint!("\r   Generated {}/{chats} chats", chat + 1);
    }

    let elapsed = start.elapsed();
    println!("\n\nDone!");
    println!("   Size: {:.2} MB", bytes_written as f64 / 1_000_000.0);
    println!("   Time: {:.2}s", elapsed.as_secs_f64());
    Ok(())
}

fn generate_chat(rng: &mut impl Rng, dir: &Path, count: usize) -> io::Result<usize> {
    let file = File::create(dir.join("messages.txt"))?;
    let mut writer = BufWriter::with_capacity(1024 * 1024, file);
    let mut bytes_written = 0usize;

    let mut timestamp = start_time(rng);

    // Lines before the first header are dropped by the tokenizer.
    bytes_written += write_line(&mut writer, "Chat export preamble")?;

    for i in 0..count {
        timestamp += next_gap(rng);
        let author = AUTHORS.choose(rng).copied().unwrap_or("Alice");
        let header = timestamp.format("[%-d.%-m.%Y, %-H:%M]");
        let body = generate_body(rng, dir, i)?;

        bytes_written += write_line(&mut writer, &format!("{header} {author}: {body}"))?;

        // Header-like lines that must fold into the previous body.
        if i % 997 == 500 {
            bytes_written += write_line(&mut writer, "[31.2.2020, 10:00] Nobody: impossible date")?;
            bytes_written += write_line(&mut writer, "[1.1.2020 10:00] Nobody: missing comma")?;
        }
    }

    writer.flush()?;
    Ok(bytes_written)
}

fn write_line(writer: &mut impl Write, line: &str) -> io::Result<usize> {
    writeln!(writer, "{line}")?;
    Ok(line.len() + 1)
}

fn start_time(rng: &mut impl Rng) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2020 + rng.gen_range(0..4), rng.gen_range(1..=12), 1)
        .and_then(|d| d.and_hms_opt(rng.gen_range(0..24), 0, 0))
        .unwrap_or_default()
}

/// Mostly short gaps with occasional long pauses, so context windows both
/// extend and stop.
fn next_gap(rng: &mut impl Rng) -> TimeDelta {
    match rng.gen_range(0..10) {
        0..=6 => TimeDelta::minutes(rng.gen_range(0..10)),
        7 | 8 => TimeDelta::minutes(rng.gen_range(20..45)),
        _ => TimeDelta::hours(rng.gen_range(2..48)),
    }
}

fn generate_body(rng: &mut impl Rng, dir: &Path, index: usize) -> io::Result<String> {
    let text = TEXTS.choose(rng).copied().unwrap_or_default();

    let body = match index % 12 {
        0..=4 => format!("{text} #{index}"),
        5 => format!("{text}\ncontinued on a second line\nand a third"),
        6 | 7 => {
            let link = LINKS.choose(rng).copied().unwrap_or_default();
            format!("see {link} {text}")
        }
        8 | 9 => {
            let (keyword, ext) = ATTACHMENTS.choose(rng).copied().unwrap_or(("Bild", "jpg"));
            let identifier = format!("{:08x}-{index:06}.{ext}", rng.r#gen::<u32>());
            if rng.gen_bool(0.5) {
                fs::write(dir.join(&identifier), b"")?;
            }
            let duration = if matches!(keyword, "Video" | "Audio") {
                format!(" ({:02}:{:02})", rng.gen_range(0..60), rng.gen_range(0..60))
            } else {
                String::new()
            };
            format!("{keyword}:{duration} {text} <{identifier}>")
        }
        10 => {
            let (name, lat, lon) = PLACES.choose(rng).copied().unwrap_or(("Home", 0.0, 0.0));
            format!("Ort: {name} <geo:{lat},{lon}?z=15>")
        }
        _ => String::new(),
    };

    Ok(body)
}
