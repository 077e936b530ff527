//! Formula lists and mass override files.

use anyhow::Context;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;
use stoich_formula::MassTable;

/// One formula per line; blank lines and `#` comments are skipped.
pub fn read_formula_list<R: BufRead>(reader: R) -> io::Result<Vec<String>> {
    let mut formulas = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        formulas.push(trimmed.to_string());
    }
    Ok(formulas)
}

/// Formulas from `input` (a file, or `-` for stdin) followed by `args`.
pub fn collect_formulas(args: &[String], input: Option<&Path>) -> anyhow::Result<Vec<String>> {
    let mut formulas = match input {
        Some(path) if path == Path::new("-") => {
            read_formula_list(io::stdin().lock()).context("Failed to read formulas from stdin")?
        }
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open formula list {}", path.display()))?;
            read_formula_list(BufReader::new(file))
                .with_context(|| format!("Failed to read formula list {}", path.display()))?
        }
        None => Vec::new(),
    };
    formulas.extend(args.iter().cloned());
    if formulas.is_empty() {
        anyhow::bail!("No formulas given (pass them as arguments or with --input)");
    }
    Ok(formulas)
}

/// Reads a JSON object of `{symbol: mass}` entries.
pub fn read_mass_overrides<R: Read>(reader: R) -> anyhow::Result<BTreeMap<String, f64>> {
    serde_json::from_reader(reader).context("Mass file must be a JSON object of symbol to mass")
}

/// Standard table, extended with the entries of `path` when given.
pub fn load_mass_table(path: Option<&Path>) -> anyhow::Result<MassTable> {
    let mut table = MassTable::standard();
    let Some(path) = path else {
        return Ok(table);
    };

    let file =
        File::open(path).with_context(|| format!("Failed to open mass file {}", path.display()))?;
    let overrides = read_mass_overrides(BufReader::new(file))
        .with_context(|| format!("Invalid mass file {}", path.display()))?;
    let count = overrides.len();
    table
        .extend_from(overrides)
        .with_context(|| format!("Invalid mass file {}", path.display()))?;

    tracing::info!(path = %path.display(), entries = count, "Loaded custom atomic masses");
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formula_list_skips_blanks_and_comments() {
        let text = "H2O\n\n  # salts\nNaCl  \r\n\tFe2(SO4)3\n";
        let formulas = read_formula_list(text.as_bytes()).unwrap();
        assert_eq!(formulas, ["H2O", "NaCl", "Fe2(SO4)3"]);
    }

    #[test]
    fn arguments_follow_file_entries() {
        let formulas = collect_formulas(&["CO2".into()], None).unwrap();
        assert_eq!(formulas, ["CO2"]);
        assert!(collect_formulas(&[], None).is_err());
    }

    #[test]
    fn missing_list_file_is_an_error() {
        let err = collect_formulas(&[], Some(Path::new("/nonexistent/formulas.txt"))).unwrap_err();
        assert!(err.to_string().contains("Failed to open formula list"));
    }

    #[test]
    fn mass_overrides_parse_from_json() {
        let overrides = read_mass_overrides(r#"{"D": 2.014, "U235": 235.0439}"#.as_bytes()).unwrap();
        assert_eq!(overrides["D"], 2.014);
        assert_eq!(overrides.len(), 2);

        assert!(read_mass_overrides(r#"["D", 2.014]"#.as_bytes()).is_err());
        assert!(read_mass_overrides(r#"{"D": "heavy"}"#.as_bytes()).is_err());
    }

    #[test]
    fn no_mass_file_gives_standard_table() {
        let table = load_mass_table(None).unwrap();
        assert_eq!(table.lookup("H"), Some(1.008));
        assert!(!table.is_custom("H"));
    }
}
