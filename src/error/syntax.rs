use crate::error::{Error, ErrorKind};

impl Error {
    pub(crate) fn syntax(message: impl ToString, offset: usize) -> Self {
        ErrorKind::Syntax {
            message: message.to_string(),
            offset,
        }
        .into()
    }

    /// The byte offset into the parsed text at which a syntax error was detected, or `None` if
    /// this is not a syntax error.
    pub fn offset(&self) -> Option<usize> {
        match self.kind {
            ErrorKind::Syntax { offset, .. } => Some(offset),
            _ => None,
        }
    }

    /// Maps the offset of a syntax error onto a 1-based `(line, column)` pair within `text`,
    /// which must be the text that was parsed. Columns count characters, not bytes.
    ///
    /// ```
    /// let text = "{\n  \"a\" : 1,\n  \"b\" : }";
    /// let err = mongo_extjson::from_json(text).unwrap_err();
    /// assert_eq!(err.line_column(text), Some((3, 9)));
    /// ```
    pub fn line_column(&self, text: &str) -> Option<(usize, usize)> {
        let offset = self.offset()?;
        let mut end = offset.min(text.len());
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        let before = &text[..end];
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
        let column = before[line_start..].chars().count() + 1;
        Some((line, column))
    }

    #[cfg(test)]
    pub(crate) fn is_syntax(&self) -> bool {
        matches!(self.kind, ErrorKind::Syntax { .. })
    }

    #[cfg(test)]
    pub(crate) fn syntax_message(&self) -> Option<&str> {
        match &self.kind {
            ErrorKind::Syntax { message, .. } => Some(message),
            _ => None,
        }
    }
}
