//! `encode` and `decode` subcommands.

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;
use thiserror::Error;
use token_codec::SymmetricCodec;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Read a JSON document and print its sealed token
    Encode {
        /// Read from this file instead of stdin
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
    /// Read a sealed token and print the JSON document it contains
    Decode {
        /// Read from this file instead of stdin
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Pretty-print the decoded JSON
        #[arg(long)]
        pretty: bool,
    },
}

/// Problems with the command input, detected before the codec runs.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read input: {0}")]
    Read(#[from] io::Error),

    #[error("input is empty")]
    Empty,

    #[error("input is not valid JSON: {0}")]
    NotJson(#[source] serde_json::Error),
}

/// Execute `command`, writing its result to `out`.
pub fn run(command: &Command, codec: &SymmetricCodec, out: &mut impl Write) -> Result<()> {
    match command {
        Command::Encode { input } => {
            let text = read_input(input.as_deref())?;
            encode(&text, codec, out)
        }
        Command::Decode { input, pretty } => {
            let text = read_input(input.as_deref())?;
            decode(&text, *pretty, codec, out)
        }
    }
}

fn read_input(path: Option<&Path>) -> Result<String, InputError> {
    let mut buf = String::new();
    match path {
        Some(p) => File::open(p)?.read_to_string(&mut buf)?,
        None => io::stdin().lock().read_to_string(&mut buf)?,
    };
    Ok(buf)
}

fn encode(text: &str, codec: &SymmetricCodec, out: &mut impl Write) -> Result<()> {
    if text.trim().is_empty() {
        return Err(InputError::Empty.into());
    }
    let value: Value = serde_json::from_str(text).map_err(InputError::NotJson)?;
    let token = codec.encode(&value)?;
    writeln!(out, "{token}").context("failed to write token")?;
    info!(token_len = token.len(), "encoded input");
    Ok(())
}

fn decode(text: &str, pretty: bool, codec: &SymmetricCodec, out: &mut impl Write) -> Result<()> {
    let token = text.trim();
    if token.is_empty() {
        return Err(InputError::Empty.into());
    }
    let value: Value = codec.decode(token)?;
    let written = if pretty {
        serde_json::to_writer_pretty(&mut *out, &value)
    } else {
        serde_json::to_writer(&mut *out, &value)
    };
    written.context("failed to write decoded value")?;
    writeln!(out).context("failed to write decoded value")?;
    info!(token_len = token.len(), "decoded input");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use token_codec::CodecError;

    fn codec() -> SymmetricCodec {
        SymmetricCodec::new("sealctl-test")
    }

    fn encode_to_string(text: &str) -> Result<String> {
        let mut out = Vec::new();
        encode(text, &codec(), &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn args_parse_subcommands() {
        let args = Args::parse_from(["sealctl", "decode", "--pretty", "-i", "token.txt"]);
        match args.command {
            Command::Decode { input, pretty } => {
                assert!(pretty);
                assert_eq!(input.unwrap(), PathBuf::from("token.txt"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn encode_then_decode_through_commands() {
        let token = encode_to_string(r#"{"role":"user","text":"hello"}"#).unwrap();
        assert!(token.ends_with('\n'));

        let mut out = Vec::new();
        decode(&token, false, &codec(), &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "{\"role\":\"user\",\"text\":\"hello\"}\n"
        );
    }

    #[test]
    fn pretty_decode_is_indented() {
        let token = encode_to_string("[1,2,3]").unwrap();
        let mut out = Vec::new();
        decode(&token, true, &codec(), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "[\n  1,\n  2,\n  3\n]\n");
    }

    #[test]
    fn encode_rejects_non_json_input() {
        let err = encode_to_string("not json").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<InputError>(),
            Some(InputError::NotJson(_))
        ));
    }

    #[test]
    fn empty_input_is_rejected() {
        let err = encode_to_string("  \n").unwrap_err();
        assert!(matches!(err.downcast_ref::<InputError>(), Some(InputError::Empty)));

        let mut out = Vec::new();
        let err = decode("\n", false, &codec(), &mut out).unwrap_err();
        assert!(matches!(err.downcast_ref::<InputError>(), Some(InputError::Empty)));
    }

    #[test]
    fn decode_of_garbage_is_a_codec_error() {
        let mut out = Vec::new();
        let err = decode("not-a-valid-token", false, &codec(), &mut out).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CodecError>(),
            Some(CodecError::Decode(_))
        ));
        assert!(out.is_empty());
    }

    #[test]
    fn missing_input_file_is_an_input_error() {
        let err = read_input(Some(Path::new("/nonexistent/sealctl/input.json"))).unwrap_err();
        assert!(matches!(err, InputError::Read(_)));
    }
}
