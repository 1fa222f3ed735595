//! Compressed artifact naming
//!
//! Templates use three placeholders, all computed from the last path
//! segment of the original name:
//! - `[base]`: file name with extension (`app.js`)
//! - `[name]`: file name without extension (`app`)
//! - `[ext]`: extension including the dot (`.js`), empty when there is none
//!
//! The original's directory prefix is kept, so `js/app.js` with
//! `[base].br` becomes `js/app.js.br`.

const PLACEHOLDERS: [(&str, Part); 3] = [
    ("[base]", Part::Base),
    ("[name]", Part::Name),
    ("[ext]", Part::Ext),
];

#[derive(Debug, Clone, Copy)]
enum Part {
    Base,
    Name,
    Ext,
}

/// Components of an artifact name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameParts<'a> {
    /// Directory prefix including the trailing `/`, empty at the root
    pub dir: &'a str,
    /// File name with extension
    pub base: &'a str,
    /// File name without extension
    pub name: &'a str,
    /// Extension with leading dot, or empty
    pub ext: &'a str,
}

impl<'a> NameParts<'a> {
    /// Split an artifact name into its parts
    pub fn parse(original: &'a str) -> Self {
        let (dir, base) = match original.rfind('/') {
            Some(idx) => original.split_at(idx + 1),
            None => ("", original),
        };

        // A leading dot marks a hidden file, not an extension
        let ext_start = match base.rfind('.') {
            Some(0) | None => None,
            Some(_) if base.bytes().all(|b| b == b'.') => None,
            Some(idx) => Some(idx),
        };

        let (name, ext) = match ext_start {
            Some(idx) => base.split_at(idx),
            None => (base, ""),
        };

        Self {
            dir,
            base,
            name,
            ext,
        }
    }

    fn get(&self, part: Part) -> &'a str {
        match part {
            Part::Base => self.base,
            Part::Name => self.name,
            Part::Ext => self.ext,
        }
    }
}

/// Derive the compressed artifact name from `template`
///
/// Placeholders are replaced in a single left-to-right pass; substituted
/// text is never rescanned and unknown bracketed tokens are copied as is.
pub fn derive_name(original: &str, template: &str) -> String {
    let parts = NameParts::parse(original);

    let mut derived = String::with_capacity(parts.dir.len() + template.len() + parts.base.len());
    derived.push_str(parts.dir);

    let mut rest = template;
    while let Some(start) = rest.find('[') {
        derived.push_str(&rest[..start]);
        let tail = &rest[start..];

        match PLACEHOLDERS.iter().find(|(token, _)| tail.starts_with(token)) {
            Some((token, part)) => {
                derived.push_str(parts.get(*part));
                rest = &tail[token.len()..];
            }
            None => {
                derived.push('[');
                rest = &tail[1..];
            }
        }
    }
    derived.push_str(rest);

    derived
}
