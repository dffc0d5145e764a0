/// Which stitch vocabulary a pattern is written in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Terminology {
    /// US terms (`sc`, `dc`, ...). The parser's native vocabulary.
    #[default]
    Us,
    /// UK terms, where UK `dc` is US `sc` and UK `tr` is US `dc`.
    Uk,
}

impl Terminology {
    /// Map the `isUSTerms` toggle of a view layer onto a terminology.
    pub fn from_us_flag(is_us: bool) -> Self {
        if is_us { Self::Us } else { Self::Uk }
    }
}

/// Rewrite UK stitch abbreviations into their US equivalents.
///
/// A token is a maximal run of ASCII letters, so `2dc` becomes `2sc` but `dcx` is left alone.
/// Every token is looked up once against the input text: a `dc` produced from `tr` is never
/// rewritten again to `sc`.
pub fn normalize(text: &str, terms: Terminology) -> String {
    if terms == Terminology::Us {
        return text.to_owned();
    }

    let mut out = String::with_capacity(text.len());
    let mut word_start: Option<usize> = None;

    for (i, ch) in text.char_indices() {
        if ch.is_ascii_alphabetic() {
            word_start.get_or_insert(i);
            continue;
        }
        if let Some(start) = word_start.take() {
            out.push_str(uk_to_us(&text[start..i]));
        }
        out.push(ch);
    }
    if let Some(start) = word_start {
        out.push_str(uk_to_us(&text[start..]));
    }

    out
}

fn uk_to_us(word: &str) -> &str {
    match word {
        "dc" => "sc",
        "tr" => "dc",
        w if w.eq_ignore_ascii_case("increase") => "inc",
        w if w.eq_ignore_ascii_case("decrease") => "dec",
        w => w,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/notation/normalize.rs"]
mod tests;
