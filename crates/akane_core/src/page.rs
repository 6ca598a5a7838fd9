//! Renderable display units.

use crate::limits::{
    CONTENT_CHARS, EMBED_DESCRIPTION_CHARS, EMBED_FIELD_NAME_CHARS, EMBED_FIELD_VALUE_CHARS,
    EMBED_FIELDS, EMBED_FOOTER_CHARS, EMBED_TITLE_CHARS, EMBED_TOTAL_CHARS, check_chars,
    check_count,
};
use akane_error::{NavigatorError, NavigatorErrorKind, NavigatorResult};
use serde::{Deserialize, Serialize};

/// One unit of content shown at a time inside a paginated message.
///
/// Pages are immutable once built; switching what a message shows means
/// switching to a different page or a different store, never editing a page.
///
/// # Examples
///
/// ```
/// use akane_core::{EmbedPage, Page};
///
/// let text = Page::from("No results found.");
/// assert!(text.validate().is_ok());
///
/// let embed: Page = EmbedPage::builder()
///     .title("Sousou no Frieren")
///     .description("An elf mage outlives her party.")
///     .build()
///     .unwrap()
///     .into();
/// assert_eq!(embed.title(), Some("Sousou no Frieren"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Page {
    /// Plain message content
    Text(String),
    /// Rich embed document
    Embed(EmbedPage),
}

impl Page {
    /// Title of the page, if it has one.
    pub fn title(&self) -> Option<&str> {
        match self {
            Page::Text(_) => None,
            Page::Embed(embed) => embed.title.as_deref(),
        }
    }

    /// Checks the page against the platform payload limits.
    ///
    /// # Errors
    ///
    /// Returns [`NavigatorErrorKind::RenderLimit`] if any part is too long and
    /// [`NavigatorErrorKind::MalformedPage`] if the page has nothing to show.
    pub fn validate(&self) -> NavigatorResult<()> {
        match self {
            Page::Text(content) => {
                if content.trim().is_empty() {
                    return Err(NavigatorError::new(NavigatorErrorKind::MalformedPage(
                        "text page is empty".to_string(),
                    )));
                }
                check_chars("message content", content, CONTENT_CHARS)
            }
            Page::Embed(embed) => embed.validate(),
        }
    }

    /// Returns this page with a `Page i/n` marker in the embed footer.
    ///
    /// Text pages are returned unchanged.
    pub fn with_counter(self, index: usize, total: usize) -> Page {
        match self {
            Page::Text(content) => Page::Text(content),
            Page::Embed(mut embed) => {
                let marker = format!("Page {}/{}", index + 1, total);
                embed.footer = Some(match embed.footer.take() {
                    Some(footer) if !footer.is_empty() => format!("{footer} • {marker}"),
                    _ => marker,
                });
                Page::Embed(embed)
            }
        }
    }
}

impl From<String> for Page {
    fn from(content: String) -> Self {
        Page::Text(content)
    }
}

impl From<&str> for Page {
    fn from(content: &str) -> Self {
        Page::Text(content.to_string())
    }
}

impl From<EmbedPage> for Page {
    fn from(embed: EmbedPage) -> Self {
        Page::Embed(embed)
    }
}

/// A name/value pair shown inside an embed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct EmbedField {
    name: String,
    value: String,
    inline: bool,
}

impl EmbedField {
    /// Creates a field.
    pub fn new(name: impl Into<String>, value: impl Into<String>, inline: bool) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            inline,
        }
    }
}

/// Structured document page.
#[derive(
    Debug,
    Clone,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_builder::Builder,
)]
#[builder(build_fn(private, name = "build_internal"))]
pub struct EmbedPage {
    /// Heading shown at the top of the embed
    #[builder(setter(into, strip_option), default)]
    title: Option<String>,
    /// Body text
    #[builder(setter(into, strip_option), default)]
    description: Option<String>,
    /// Link target of the title
    #[builder(setter(into, strip_option), default)]
    url: Option<String>,
    /// Side bar colour as 0xRRGGBB
    #[builder(setter(strip_option), default)]
    color: Option<u32>,
    /// Name/value fields in display order
    #[builder(setter(into), default)]
    fields: Vec<EmbedField>,
    /// Large image URL
    #[builder(setter(into, strip_option), default)]
    image: Option<String>,
    /// Thumbnail URL
    #[builder(setter(into, strip_option), default)]
    thumbnail: Option<String>,
    /// Footer text
    #[builder(setter(into, strip_option), default)]
    footer: Option<String>,
}

impl EmbedPageBuilder {
    /// Builds the embed page.
    ///
    /// Every field is optional, so building only fails on a builder bug;
    /// content is checked by [`EmbedPage::validate`] at render time.
    pub fn build(&self) -> NavigatorResult<EmbedPage> {
        self.build_internal()
            .map_err(|e| NavigatorError::new(NavigatorErrorKind::MalformedPage(e.to_string())))
    }
}

impl EmbedPage {
    /// Creates a new embed page builder.
    pub fn builder() -> EmbedPageBuilder {
        EmbedPageBuilder::default()
    }

    /// Characters counted against the embed total limit.
    pub fn char_count(&self) -> usize {
        let text = |value: &Option<String>| value.as_deref().map_or(0, |s| s.chars().count());
        text(&self.title)
            + text(&self.description)
            + text(&self.footer)
            + self
                .fields
                .iter()
                .map(|field| field.name.chars().count() + field.value.chars().count())
                .sum::<usize>()
    }

    fn is_blank(&self) -> bool {
        let blank = |value: &Option<String>| value.as_deref().is_none_or(|s| s.trim().is_empty());
        blank(&self.title)
            && blank(&self.description)
            && blank(&self.image)
            && blank(&self.thumbnail)
            && self.fields.is_empty()
    }

    /// Checks the embed against the platform payload limits.
    pub fn validate(&self) -> NavigatorResult<()> {
        if self.is_blank() {
            return Err(NavigatorError::new(NavigatorErrorKind::MalformedPage(
                "embed has no visible content".to_string(),
            )));
        }
        if let Some(title) = &self.title {
            check_chars("embed title", title, EMBED_TITLE_CHARS)?;
        }
        if let Some(description) = &self.description {
            check_chars("embed description", description, EMBED_DESCRIPTION_CHARS)?;
        }
        if let Some(footer) = &self.footer {
            check_chars("embed footer", footer, EMBED_FOOTER_CHARS)?;
        }
        check_count("embed fields", self.fields.len(), EMBED_FIELDS)?;
        for field in &self.fields {
            if field.name.trim().is_empty() || field.value.trim().is_empty() {
                return Err(NavigatorError::new(NavigatorErrorKind::MalformedPage(
                    "embed field name and value must not be empty".to_string(),
                )));
            }
            check_chars("embed field name", &field.name, EMBED_FIELD_NAME_CHARS)?;
            check_chars("embed field value", &field.value, EMBED_FIELD_VALUE_CHARS)?;
        }
        check_count("embed total", self.char_count(), EMBED_TOTAL_CHARS)
    }
}
