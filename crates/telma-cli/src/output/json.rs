//! JSON output formatting

use anyhow::Result;
use serde::Serialize;

pub struct JsonFormatter;

impl JsonFormatter {
    /// Serialize a whole payload as one pretty JSON document.
    pub fn document<T: Serialize + ?Sized>(value: &T) -> Result<String> {
        let mut json = serde_json::to_string_pretty(value)?;
        json.push('\n');
        Ok(json)
    }

    /// Serialize each item on its own line.
    pub fn lines<'a, T, I>(items: I) -> Result<String>
    where
        T: Serialize + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        let mut out = String::new();
        for item in items {
            out.push_str(&serde_json::to_string(item)?);
            out.push('\n');
        }
        Ok(out)
    }
}
