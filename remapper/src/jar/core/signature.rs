use crate::jar::types::MappingTable;

/// Renames every class type of a field/method descriptor or generic
/// signature whose binary name is mapped.
///
/// The text is walked along the signature grammar, so type parameter and
/// type variable names (`<L:...>`, `TLabel;`) are never taken for classes.
/// `None` when nothing changed, or when the text is neither a descriptor
/// nor a signature.
pub fn remap_descriptor(text: &str, table: &MappingTable) -> Option<String> {
    let mut scanner = SignatureScanner {
        text,
        table,
        pos: 0,
        out: String::new(),
        copied_up_to: 0,
    };
    scanner.signature()?;
    scanner.finish()
}

struct SignatureScanner<'a> {
    text: &'a str,
    table: &'a MappingTable,
    pos: usize,
    out: String,
    copied_up_to: usize,
}

impl<'a> SignatureScanner<'a> {
    fn peek(&self) -> Option<u8> {
        self.text.as_bytes().get(self.pos).copied()
    }

    fn eat(&mut self, byte: u8) -> Option<()> {
        if self.peek()? != byte {
            return None;
        }
        self.pos += 1;
        Some(())
    }

    /// Field descriptor or signature, method descriptor or signature, or
    /// class signature. Must consume the whole text.
    fn signature(&mut self) -> Option<()> {
        if self.peek()? == b'<' {
            self.type_parameters()?;
        }

        if self.peek()? == b'(' {
            self.pos += 1;
            while self.peek()? != b')' {
                self.java_type()?;
            }
            self.pos += 1;
            if self.peek()? == b'V' {
                self.pos += 1;
            } else {
                self.java_type()?;
            }
            while self.peek() == Some(b'^') {
                self.pos += 1;
                self.reference_type()?;
            }
        } else {
            self.java_type()?;
            // Superinterfaces of a class signature
            while self.peek().is_some() {
                self.class_type()?;
            }
        }

        (self.pos == self.text.len()).then_some(())
    }

    fn type_parameters(&mut self) -> Option<()> {
        self.eat(b'<')?;
        loop {
            self.identifier(false)?;
            self.eat(b':')?;
            // Class bound may be empty when only interface bounds follow
            if matches!(self.peek()?, b'L' | b'T' | b'[') {
                self.reference_type()?;
            }
            while self.peek()? == b':' {
                self.pos += 1;
                self.reference_type()?;
            }
            if self.peek()? == b'>' {
                self.pos += 1;
                return Some(());
            }
        }
    }

    fn java_type(&mut self) -> Option<()> {
        match self.peek()? {
            b'B' | b'C' | b'D' | b'F' | b'I' | b'J' | b'S' | b'Z' => {
                self.pos += 1;
                Some(())
            }
            _ => self.reference_type(),
        }
    }

    fn reference_type(&mut self) -> Option<()> {
        match self.peek()? {
            b'L' => self.class_type(),
            b'T' => {
                self.pos += 1;
                self.identifier(false)?;
                self.eat(b';')
            }
            b'[' => {
                self.pos += 1;
                self.java_type()
            }
            _ => None,
        }
    }

    fn class_type(&mut self) -> Option<()> {
        self.eat(b'L')?;
        let (start, end) = self.identifier(true)?;
        self.rename(start, end);
        self.type_arguments()?;

        // Inner class suffixes are simple names
        while self.peek()? == b'.' {
            self.pos += 1;
            self.identifier(false)?;
            self.type_arguments()?;
        }
        self.eat(b';')
    }

    fn type_arguments(&mut self) -> Option<()> {
        if self.peek() != Some(b'<') {
            return Some(());
        }
        self.pos += 1;
        loop {
            match self.peek()? {
                b'*' => self.pos += 1,
                b'+' | b'-' => {
                    self.pos += 1;
                    self.reference_type()?;
                }
                _ => self.reference_type()?,
            }
            if self.peek()? == b'>' {
                self.pos += 1;
                return Some(());
            }
        }
    }

    /// Non-empty run of identifier bytes; `/` is allowed in binary names.
    /// Delimiters are ASCII, so the bounds are always char boundaries.
    fn identifier(&mut self, binary_name: bool) -> Option<(usize, usize)> {
        let start = self.pos;
        while let Some(byte) = self.peek() {
            match byte {
                b'.' | b';' | b'[' | b'<' | b'>' | b':' => break,
                b'/' if !binary_name => break,
                _ => self.pos += 1,
            }
        }
        (self.pos > start).then_some((start, self.pos))
    }

    fn rename(&mut self, start: usize, end: usize) {
        let text = self.text;
        let table = self.table;
        if let Some(mapped) = table.get(&text[start..end]) {
            self.out.push_str(&text[self.copied_up_to..start]);
            self.out.push_str(mapped);
            self.copied_up_to = end;
        }
    }

    fn finish(mut self) -> Option<String> {
        if self.copied_up_to == 0 {
            return None;
        }
        self.out.push_str(&self.text[self.copied_up_to..]);
        Some(self.out)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn table() -> MappingTable {
        MappingTable::from_assigned(HashMap::from([
            ("com/a/B".to_string(), "αβγ".to_string()),
            ("com/a/C".to_string(), "δεζ".to_string()),
            ("L".to_string(), "λλλ".to_string()),
        ]))
    }

    fn remap(text: &str) -> Option<String> {
        remap_descriptor(text, &table())
    }

    #[test]
    fn renames_field_and_method_descriptors() {
        assert_eq!(remap("Lcom/a/B;").as_deref(), Some("Lαβγ;"));
        assert_eq!(
            remap("(ILcom/a/B;[Lcom/a/C;Ljava/lang/String;)Lcom/a/C;").as_deref(),
            Some("(ILαβγ;[Lδεζ;Ljava/lang/String;)Lδεζ;")
        );
        assert_eq!(remap("([[Lcom/a/B;)V").as_deref(), Some("([[Lαβγ;)V"));
    }

    #[test]
    fn renames_inside_generic_signatures() {
        assert_eq!(
            remap("Ljava/util/Map<Lcom/a/B;Ljava/util/List<Lcom/a/C;>;>;").as_deref(),
            Some("Ljava/util/Map<Lαβγ;Ljava/util/List<Lδεζ;>;>;")
        );
        assert_eq!(
            remap("<T:Lcom/a/B;>Ljava/lang/Object;").as_deref(),
            Some("<T:Lαβγ;>Ljava/lang/Object;")
        );
        assert_eq!(
            remap("Lcom/a/B<TT;>.Inner;").as_deref(),
            Some("Lαβγ<TT;>.Inner;")
        );
        assert_eq!(
            remap("Ljava/util/List<+Lcom/a/B;>;").as_deref(),
            Some("Ljava/util/List<+Lαβγ;>;")
        );
    }

    #[test]
    fn type_parameter_names_are_not_classes() {
        assert_eq!(
            remap("<L:Lcom/a/B;>Ljava/lang/Object;").as_deref(),
            Some("<L:Lαβγ;>Ljava/lang/Object;")
        );
        assert_eq!(
            remap("<TLabel:Lcom/a/B;>(TTLabel;)V").as_deref(),
            Some("<TLabel:Lαβγ;>(TTLabel;)V")
        );
        assert_eq!(
            remap("<K:Ljava/lang/Object;L::Lcom/a/C;>(TL;TK;)Lcom/a/B;").as_deref(),
            Some("<K:Ljava/lang/Object;L::Lδεζ;>(TL;TK;)Lαβγ;")
        );
    }

    #[test]
    fn class_signatures_with_interfaces() {
        let signature = "<E:Ljava/lang/Object;>Lcom/a/B;Ljava/lang/Comparable<TE;>;Lcom/a/C;";
        assert_eq!(
            remap(signature).as_deref(),
            Some("<E:Ljava/lang/Object;>Lαβγ;Ljava/lang/Comparable<TE;>;Lδεζ;")
        );
    }

    #[test]
    fn throws_clauses() {
        assert_eq!(
            remap("<X:Ljava/lang/Throwable;>()V^Lcom/a/B;^TX;").as_deref(),
            Some("<X:Ljava/lang/Throwable;>()V^Lαβγ;^TX;")
        );
    }

    #[test]
    fn leaves_unmapped_text_alone() {
        assert_eq!(remap("(IJ)V"), None);
        assert_eq!(remap("Ljava/lang/Object;"), None);
        assert_eq!(remap("Ljava/util/List<*>;"), None);
        assert_eq!(remap("Hello, World"), None);
        assert_eq!(remap("<init>"), None);
        assert_eq!(remap("onLoad"), None);
        assert_eq!(remap("L"), None);
        assert_eq!(remap(""), None);
    }

    #[test]
    fn malformed_signatures_are_not_touched() {
        assert_eq!(remap("Lcom/a/B"), None);
        assert_eq!(remap("Lcom/a/B;x"), None);
        assert_eq!(remap("(Lcom/a/B;"), None);
        assert_eq!(remap("see Lcom/a/B; here"), None);
    }

    #[test]
    fn default_package_class_named_like_tag() {
        assert_eq!(remap("LL;").as_deref(), Some("Lλλλ;"));
        assert_eq!(remap("TL;"), None);
    }
}
