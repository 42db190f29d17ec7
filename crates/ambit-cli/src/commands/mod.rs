//! CLI command implementations.

pub mod params;
pub mod render;

/// Split `KEY=VALUE` for `--param`.
pub fn parse_key_val(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(format!(
            "Invalid parameter format: '{}' (expected KEY=VALUE)",
            s
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_val() {
        assert_eq!(
            parse_key_val("CUTOFF=1kHz").unwrap(),
            ("CUTOFF".to_string(), "1kHz".to_string())
        );
        assert_eq!(
            parse_key_val(" MIX = 50% ").unwrap(),
            ("MIX".to_string(), "50%".to_string())
        );
        assert!(parse_key_val("CUTOFF").is_err());
        assert!(parse_key_val("=3").is_err());
    }
}
