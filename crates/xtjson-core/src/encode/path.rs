use std::fmt;

///
/// JsonPath
///
/// Location of the node currently being encoded, rendered in the
/// `$.key[0]` form used by encode error messages.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct JsonPath {
    segments: Vec<Segment>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
enum Segment {
    Key(String),
    Index(usize),
}

impl JsonPath {
    #[must_use]
    pub const fn root() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    pub(super) fn push_key(&mut self, key: &str) {
        self.segments.push(Segment::Key(key.to_string()));
    }

    pub(super) fn push_index(&mut self, index: usize) {
        self.segments.push(Segment::Index(index));
    }

    pub(super) fn pop(&mut self) {
        self.segments.pop();
    }
}

// Keys that are not plain identifiers are rendered bracketed and quoted.
fn is_plain_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$' || c == '-')
}

impl fmt::Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("$")?;
        for segment in &self.segments {
            match segment {
                Segment::Key(key) if is_plain_key(key) => write!(f, ".{key}")?,
                Segment::Key(key) => write!(f, "[{key:?}]")?,
                Segment::Index(index) => write!(f, "[{index}]")?,
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_keys_and_indexes() {
        let mut path = JsonPath::root();
        assert_eq!(path.to_string(), "$");

        path.push_key("tx_ops");
        path.push_index(2);
        path.push_key("xt$id");
        assert_eq!(path.to_string(), "$.tx_ops[2].xt$id");

        path.pop();
        path.push_key("first name");
        assert_eq!(path.to_string(), r#"$.tx_ops[2]["first name"]"#);
    }

    #[test]
    fn empty_key_is_bracketed() {
        let mut path = JsonPath::root();
        path.push_key("");

        assert_eq!(path.to_string(), r#"$[""]"#);
    }
}
