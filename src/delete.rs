//! Delete：DELETE 语句。

use crate::buffer::{BuildError, Buffer};
use crate::builder::Builder;
use crate::filter::Filter;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Delete {
    pub table: String,
    pub filter: Filter,
}

impl Delete {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            filter: Filter::None,
        }
    }

    pub fn where_(mut self, filter: Filter) -> Self {
        self.filter = std::mem::take(&mut self.filter).and_with(filter);
        self
    }
}

impl Builder for Delete {
    fn write_to(&self, buf: &mut Buffer<'_>) -> Result<(), BuildError> {
        buf.write_str("DELETE FROM ");
        buf.write_escape(&self.table);

        if !self.filter.is_none() {
            buf.write_str(" WHERE ");
            self.filter.write(buf)?;
        }

        buf.write_char(';');
        Ok(())
    }
}
