//! Forest emission - the whole selection as one JSON array.

use crate::error::EmitError;
use crate::model::ComponentBox;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmitStyle {
    /// Single line, as handed to a host log stream.
    #[default]
    Compact,
    /// Indented, for humans.
    Pretty,
}

pub fn to_json(forest: &[ComponentBox], style: EmitStyle) -> Result<String, EmitError> {
    let text = match style {
        EmitStyle::Compact => serde_json::to_string(forest)?,
        EmitStyle::Pretty => serde_json::to_string_pretty(forest)?,
    };
    Ok(text)
}

/// Write the forest followed by a newline.
pub fn write_forest<W: Write>(
    mut writer: W,
    forest: &[ComponentBox],
    style: EmitStyle,
) -> Result<(), EmitError> {
    let text = to_json(forest, style)?;
    writer.write_all(text.as_bytes())?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}
