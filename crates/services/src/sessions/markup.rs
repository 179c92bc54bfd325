/// Colour applied to a verdict marker inside rendered text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkerColor {
    Green,
    Red,
}

impl MarkerColor {
    #[must_use]
    pub fn css(self) -> &'static str {
        match self {
            MarkerColor::Green => "green",
            MarkerColor::Red => "red",
        }
    }
}

/// How a piece of text should be displayed. Renderers own the escaping.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TextMarkup {
    Plain(String),
    /// Bold, used for choices that are correct answers.
    Emphasized(String),
    /// `prefix` as-is, then `marker` in `color`, then `rest` as-is.
    Marked {
        prefix: String,
        marker: String,
        color: MarkerColor,
        rest: String,
    },
}

impl TextMarkup {
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        TextMarkup::Plain(text.into())
    }

    /// The underlying text with all markup removed.
    #[must_use]
    pub fn text(&self) -> String {
        match self {
            TextMarkup::Plain(text) | TextMarkup::Emphasized(text) => text.clone(),
            TextMarkup::Marked {
                prefix,
                marker,
                rest,
                ..
            } => format!("{prefix}{marker}{rest}"),
        }
    }

    #[must_use]
    pub fn is_plain(&self) -> bool {
        matches!(self, TextMarkup::Plain(_))
    }
}

/// Text about to be displayed, with the question it belongs to when known.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextRenderRequest<'a> {
    pub question_id: Option<&'a str>,
    pub text: &'a str,
}

impl<'a> TextRenderRequest<'a> {
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        Self {
            question_id: None,
            text,
        }
    }

    #[must_use]
    pub fn for_question(question_id: &'a str, text: &'a str) -> Self {
        Self {
            question_id: Some(question_id),
            text,
        }
    }
}
