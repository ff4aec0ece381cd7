//! Component C: ARPA back-off language model parser.
//!
//! Line-oriented, as spec section 4.C describes: blank lines, comments,
//! `\data\`, `ngram N=...`, and `\end\` are ignored; a `\N-grams:` header
//! sets the current order; everything else is split on whitespace and
//! dispatched by order. Orders above 3 are fatal (spec: up to trigram only).

use crate::error::BuildError;
use std::io::BufRead;

/// A single parsed n-gram record.
#[derive(Debug, Clone, PartialEq)]
pub struct NGram {
    pub order: u8,
    pub log10_prob: f64,
    pub words: Vec<String>,
    /// Present only for unigrams/bigrams; trigrams never carry one (spec:
    /// back-off weight is not recorded for the highest order).
    pub log10_backoff: Option<f64>,
}

fn parse_header(line: &str) -> Option<u8> {
    let inner = line.strip_prefix('\\')?.strip_suffix(":")?;
    let n = inner.strip_suffix("-grams")?;
    n.parse().ok()
}

fn parse_fields(
    order: u8,
    line_no: usize,
    line: &str,
) -> Result<NGram, BuildError> {
    let fields: Vec<&str> = line.split_whitespace().collect();

    let expected_min = order as usize + 1;
    let expected_max = if order == 3 {
        expected_min
    } else {
        expected_min + 1
    };
    if fields.len() < expected_min || fields.len() > expected_max {
        return Err(BuildError::InvalidFormat {
            line: line_no,
            section: order,
            text: line.to_string(),
        });
    }

    let log10_prob: f64 = fields[0].parse().map_err(|_| BuildError::InvalidFormat {
        line: line_no,
        section: order,
        text: line.to_string(),
    })?;
    let words: Vec<String> = fields[1..=order as usize].iter().map(|s| s.to_string()).collect();
    let log10_backoff = if fields.len() == expected_max {
        Some(fields[expected_max - 1].parse().map_err(|_| BuildError::InvalidFormat {
            line: line_no,
            section: order,
            text: line.to_string(),
        })?)
    } else {
        None
    };

    Ok(NGram {
        order,
        log10_prob,
        words,
        log10_backoff,
    })
}

/// Parse an ARPA file, invoking `on_ngram` for every record in section
/// order. Returns an error if an n-gram line's field count doesn't match
/// its section's order, or if an order above 3 is declared.
pub fn parse_arpa<R: BufRead>(
    reader: R,
    mut on_ngram: impl FnMut(NGram) -> Result<(), BuildError>,
) -> Result<(), BuildError> {
    let mut order: Option<u8> = None;

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line?;
        let line = line.trim();

        if line.is_empty()
            || line.starts_with('#')
            || line.starts_with("\\data")
            || line.starts_with("ngram ")
            || line.starts_with("\\end")
        {
            continue;
        }

        if line.starts_with('\\') {
            let n = parse_header(line).ok_or_else(|| BuildError::InvalidFormat {
                line: line_no,
                section: 0,
                text: line.to_string(),
            })?;
            if n > 3 {
                return Err(BuildError::UnsupportedOrder(n));
            }
            tracing::info!(order = n, "reading {n}-grams");
            order = Some(n);
            continue;
        }

        let order = order.ok_or_else(|| BuildError::InvalidFormat {
            line: line_no,
            section: 0,
            text: line.to_string(),
        })?;

        let ngram = parse_fields(order, line_no, line)?;
        on_ngram(ngram)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parses_unigram_bigram_trigram_sections() {
        let text = "\\data\\\nngram 1=2\n\\1-grams:\n-1.0 <s> -2.0\n-0.5 </s>\n\\2-grams:\n-0.3 <s> </s>\n\\3-grams:\n-0.1 <s> </s> foo\n\\end\\\n";
        let mut seen = Vec::new();
        parse_arpa(Cursor::new(text), |g| {
            seen.push(g);
            Ok(())
        })
        .unwrap();
        assert_eq!(seen.len(), 4);
        assert_eq!(seen[0].order, 1);
        assert_eq!(seen[0].words, vec!["<s>".to_string()]);
        assert_eq!(seen[0].log10_backoff, Some(-2.0));
        assert_eq!(seen[2].order, 2);
        assert_eq!(seen[2].log10_backoff, None);
        assert_eq!(seen[3].order, 3);
        assert_eq!(seen[3].log10_backoff, None);
    }

    #[test]
    fn rejects_orders_above_three() {
        let text = "\\4-grams:\n-1.0 a b c d\n";
        let err = parse_arpa(Cursor::new(text), |_| Ok(())).unwrap_err();
        assert!(matches!(err, BuildError::UnsupportedOrder(4)));
    }

    #[test]
    fn rejects_malformed_line() {
        let text = "\\1-grams:\n-1.0\n";
        let err = parse_arpa(Cursor::new(text), |_| Ok(())).unwrap_err();
        assert!(matches!(err, BuildError::InvalidFormat { .. }));
    }
}
