//! Canonical text form of a [`Reference`].

use std::fmt::{self, Write};

use super::{Format, Reference};

impl Reference {
    /// Like [`ToString::to_string`], but with a `$` in front of every fixed
    /// coordinate.
    pub fn to_marked_string(&self) -> String {
        let mut out = String::new();
        self.write_to(&mut out, true)
            .expect("writing to a String cannot fail");
        out
    }

    fn write_to(&self, out: &mut impl fmt::Write, markers: bool) -> fmt::Result {
        let marker = |fixed: bool| if markers && fixed { "$" } else { "" };

        if let Some(sheet) = self.sheet() {
            match self.format {
                Format::Excel => write!(out, "{}!", sheet)?,
                Format::Spreadsheet => write!(out, "'{}'!", sheet.replace('\'', "''"))?,
            }
        }

        write!(
            out,
            "{}{}{}{}",
            marker(self.column_fixed()),
            self.column(),
            marker(self.row_fixed()),
            self.row()
        )?;

        let has_end = self.column_end.is_some() || self.row_end.is_some();
        if has_end && !self.is_single_cell() {
            out.write_char(':')?;
            if let Some(end) = &self.column_end {
                write!(out, "{}{}", marker(end.fixed), end.value)?;
            }
            if let Some(end) = &self.row_end {
                write!(out, "{}{}", marker(end.fixed), end.value)?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_to(f, false)
    }
}
