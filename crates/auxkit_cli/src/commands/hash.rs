//! Hash command implementation.

use auxkit_hash::{Digest, Key, SipHasher24};
use clap::ValueEnum;
use serde::Serialize;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use tracing::debug;

/// What to hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HashInput {
    /// UTF-8 text.
    Text(String),
    /// Contents of a file, streamed.
    File(PathBuf),
    /// An integer, as 8 big-endian bytes.
    Number(i64),
}

/// How to print a digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// 16 hex characters of the little-endian bytes.
    Hex,
    /// The 8 little-endian bytes as decimal numbers.
    Bytes,
    /// The digest as an unsigned integer.
    U64,
    /// All of the above as a JSON object.
    Json,
}

#[derive(Serialize)]
struct DigestJson {
    hex: String,
    bytes: [u8; 8],
    value: u64,
}

/// Runs the hash command.
pub fn run(
    key_hex: &str,
    input: &HashInput,
    fold_case: bool,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let key = Key::from_hex(key_hex)?;
    let digest = compute(&SipHasher24::new(&key), input, fold_case)?;
    println!("{}", render(digest, format)?);
    Ok(())
}

fn compute(
    hasher: &SipHasher24,
    input: &HashInput,
    fold_case: bool,
) -> Result<Digest, Box<dyn std::error::Error>> {
    let digest = match input {
        HashInput::Text(text) => hasher.hash_str(text, fold_case),
        HashInput::File(path) => {
            debug!("Hashing file {:?}", path);
            hasher.compute_reader(BufReader::new(File::open(path)?))?
        }
        HashInput::Number(value) => hasher.hash_i64(*value),
    };
    Ok(digest)
}

fn render(digest: Digest, format: OutputFormat) -> Result<String, serde_json::Error> {
    Ok(match format {
        OutputFormat::Hex => digest.to_hex(),
        OutputFormat::Bytes => digest
            .to_bytes()
            .iter()
            .map(u8::to_string)
            .collect::<Vec<_>>()
            .join(" "),
        OutputFormat::U64 => digest.value().to_string(),
        OutputFormat::Json => serde_json::to_string_pretty(&DigestJson {
            hex: digest.to_hex(),
            bytes: digest.to_bytes(),
            value: digest.value(),
        })?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const KEY: &str = "000102030405060708090a0b0c0d0e0f";

    fn hasher() -> SipHasher24 {
        SipHasher24::new(&Key::from_hex(KEY).unwrap())
    }

    #[test]
    fn render_formats() {
        let digest = Digest::new(0x726f_db47_dd0e_0e31);
        assert_eq!(render(digest, OutputFormat::Hex).unwrap(), "310e0edd47db6f72");
        assert_eq!(
            render(digest, OutputFormat::Bytes).unwrap(),
            "49 14 14 221 71 219 111 114"
        );
        assert_eq!(
            render(digest, OutputFormat::U64).unwrap(),
            0x726f_db47_dd0e_0e31_u64.to_string()
        );

        let json: serde_json::Value =
            serde_json::from_str(&render(digest, OutputFormat::Json).unwrap()).unwrap();
        assert_eq!(json["hex"], "310e0edd47db6f72");
    }

    #[test]
    fn file_and_text_agree() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"hello world").unwrap();

        let from_file = compute(&hasher(), &HashInput::File(file.path().into()), false).unwrap();
        let from_text = compute(&hasher(), &HashInput::Text("hello world".into()), false).unwrap();
        assert_eq!(from_file, from_text);
    }

    #[test]
    fn fold_case_only_affects_text() {
        let upper = compute(&hasher(), &HashInput::Text("ABC".into()), true).unwrap();
        let lower = compute(&hasher(), &HashInput::Text("abc".into()), false).unwrap();
        assert_eq!(upper, lower);
    }

    #[test]
    fn number_hashes_big_endian() {
        let digest = compute(&hasher(), &HashInput::Number(258), false).unwrap();
        assert_eq!(digest, hasher().compute(&[0, 0, 0, 0, 0, 0, 1, 2]));
    }

    #[test]
    fn missing_file_is_an_error() {
        let result = compute(&hasher(), &HashInput::File("/no/such/file".into()), false);
        assert!(result.is_err());
    }
}
