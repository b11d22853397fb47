/// Accumulator for the string literals observed during code generation,
/// rendered into `.data` once the whole module has been walked. Entries
/// are only deduplicated by label, so the same text may appear twice;
/// that is acceptable.
#[derive(Debug, Clone, Default)]
pub struct StringTable {
    entries: Vec<(String, String)>,
}

impl StringTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a literal and hand back its fresh `str_N` label.
    pub fn add(&mut self, value: &str) -> String {
        let label = format!("str_{}", self.entries.len());
        self.entries.push((label.clone(), value.to_owned()));
        label
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render all collected literals as `db` lines.
    pub fn to_data_lines(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|(label, value)| format!("{label}: db {}", encode_bytes(value)))
            .collect()
    }
}

/// Encode a literal as a NASM `db` operand list: printable runs stay
/// quoted, everything else (newlines, tabs, quotes) is emitted as a
/// numeric byte. Always null-terminated.
fn encode_bytes(value: &str) -> String {
    let mut parts = vec![];
    let mut run = String::new();

    for byte in value.bytes() {
        let printable = (0x20..0x7f).contains(&byte) && byte != b'"';
        if printable {
            run.push(byte as char);
        } else {
            if !run.is_empty() {
                parts.push(format!("\"{run}\""));
                run.clear();
            }
            parts.push(byte.to_string());
        }
    }
    if !run.is_empty() {
        parts.push(format!("\"{run}\""));
    }
    parts.push("0".to_string());

    parts.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_are_sequential() {
        let mut table = StringTable::new();
        assert_eq!("str_0", table.add("a"));
        assert_eq!("str_1", table.add("b"));
        // Duplicates get their own label.
        assert_eq!("str_2", table.add("a"));
    }

    #[test]
    fn test_encoding_is_null_terminated() {
        let mut table = StringTable::new();
        table.add("hi");
        assert_eq!(vec!["str_0: db \"hi\", 0".to_string()], table.to_data_lines());
    }

    #[test]
    fn test_newlines_are_numeric_bytes() {
        let mut table = StringTable::new();
        table.add("a\nb");
        assert_eq!(
            vec!["str_0: db \"a\", 10, \"b\", 0".to_string()],
            table.to_data_lines()
        );
    }

    #[test]
    fn test_quotes_are_numeric_bytes() {
        let mut table = StringTable::new();
        table.add("\"q\"");
        assert_eq!(
            vec!["str_0: db 34, \"q\", 34, 0".to_string()],
            table.to_data_lines()
        );
    }
}
