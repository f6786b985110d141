// src/utils/payload.rs
use crate::error::{ConvertError, Result};
use std::path::Path;
use std::str::FromStr;

/// Text between the first closing and the next opening tag
/// (`<DataArray ...>payload</DataArray>`).
pub fn tag_payload(line: &str) -> Option<&str> {
    line.split(['<', '>']).nth(2)
}

/// Parse whitespace-separated numbers, skipping empty tokens.
pub fn parse_tokens<T: FromStr>(payload: &str, path: &Path) -> Result<Vec<T>> {
    payload
        .split_whitespace()
        .map(|token| {
            token.parse::<T>().map_err(|_| ConvertError::InvalidNumber {
                path: path.to_path_buf(),
                token: token.to_string(),
            })
        })
        .collect()
}

/// Group a flat list into fixed-width rows.
pub fn reshape<T: Copy + Default, const N: usize>(values: &[T], path: &Path) -> Result<Vec<[T; N]>> {
    if values.len() % N != 0 {
        return Err(ConvertError::RaggedPayload {
            path: path.to_path_buf(),
            count: values.len(),
            width: N,
        });
    }

    Ok(values
        .chunks_exact(N)
        .map(|chunk| {
            let mut row = [T::default(); N];
            row.copy_from_slice(chunk);
            row
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_payload() {
        let line = r#"        <DataArray type="Float64" format="ascii"> 0 1  2 </DataArray>"#;
        assert_eq!(tag_payload(line), Some(" 0 1  2 "));
        assert_eq!(tag_payload("<Points>"), Some(""));
        assert_eq!(tag_payload("plain text"), None);
    }

    #[test]
    fn test_parse_tokens() {
        let path = Path::new("p.vtu");
        let values: Vec<f64> = parse_tokens("  1.5 -2e3\t4 ", path).unwrap();
        assert_eq!(values, vec![1.5, -2000.0, 4.0]);

        let err = parse_tokens::<u32>("1 -2", path).unwrap_err();
        assert!(matches!(err, ConvertError::InvalidNumber { ref token, .. } if token == "-2"));
    }

    #[test]
    fn test_reshape() {
        let path = Path::new("p.vtu");
        let rows: Vec<[u32; 4]> = reshape(&[0, 1, 2, 3, 4, 5, 6, 7], path).unwrap();
        assert_eq!(rows, vec![[0, 1, 2, 3], [4, 5, 6, 7]]);

        let err = reshape::<f64, 3>(&[1.0, 2.0], path).unwrap_err();
        assert!(matches!(err, ConvertError::RaggedPayload { count: 2, width: 3, .. }));
    }
}
