use core::fmt::{self, Write};

/// Name casing, used to derive environment variable names from option paths.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub enum Case {
    #[default]
    Same,
    Lower,
    Upper,
    Snake {
        upper: bool,
    },
    Kebab {
        upper: bool,
    },
}

impl Case {
    #[inline]
    pub fn convert(&self, source: &str) -> String {
        let mut target = String::with_capacity(source.len());
        match self.convert_in(source, &mut target) {
            Ok(_) => target,
            Err(_) => unreachable!(),
        }
    }

    pub fn convert_in<W: Write>(&self, source: &str, mut target: W) -> Result<(), fmt::Error> {
        match self {
            Case::Same => target.write_str(source),
            Case::Lower => source
                .chars()
                .filter(|&letter| !is_separator(letter))
                .try_for_each(|letter| target.write_char(letter.to_ascii_lowercase())),
            Case::Upper => source
                .chars()
                .filter(|&letter| !is_separator(letter))
                .try_for_each(|letter| target.write_char(letter.to_ascii_uppercase())),
            Case::Snake { upper } => separate_in(source, target, '_', *upper),
            Case::Kebab { upper } => separate_in(source, target, '-', *upper),
        }
    }
}

/// Words split on separators and on lower-to-upper transitions.
fn separate_in<W: Write>(
    source: &str,
    mut target: W,
    separator: char,
    upper: bool,
) -> Result<(), fmt::Error> {
    let mut first = true;
    let mut separate = false;
    let mut last = None::<char>;
    for letter in source.chars() {
        if is_separator(letter) {
            separate = !first;
            last = None;
            continue;
        }
        if letter.is_uppercase() && last.map_or(false, |last| last.is_lowercase() || last.is_numeric()) {
            separate = true;
        }
        if separate {
            target.write_char(separator)?;
            separate = false;
        }
        if upper {
            target.write_char(letter.to_ascii_uppercase())?;
        } else {
            target.write_char(letter.to_ascii_lowercase())?;
        }
        first = false;
        last = Some(letter);
    }
    Ok(())
}

#[inline]
const fn is_separator(letter: char) -> bool {
    matches!(letter, '_' | '-' | ' ' | '.')
}
