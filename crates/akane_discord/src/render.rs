//! Conversion of rendered views into serenity builders.
//!
//! Every builder here is produced from one [`RenderedView`], so the page and
//! the buttons that go out in a single request always belong to the same
//! render.

use akane_core::{EmbedPage, Page};
use akane_navigator::{Activation, ControlStyle, ControlTarget, RenderedControl, RenderedView};
use serenity::all::{
    ButtonStyle, CreateActionRow, CreateButton, CreateEmbed, CreateEmbedFooter,
    CreateInteractionResponseFollowup, CreateMessage, EditMessage, ReactionType,
};

/// Build a serenity embed from an embed page.
pub fn embed(page: &EmbedPage) -> CreateEmbed {
    let mut embed = CreateEmbed::new();
    if let Some(title) = page.title() {
        embed = embed.title(title);
    }
    if let Some(description) = page.description() {
        embed = embed.description(description);
    }
    if let Some(url) = page.url() {
        embed = embed.url(url);
    }
    if let Some(color) = page.color() {
        embed = embed.colour(*color);
    }
    for field in page.fields() {
        embed = embed.field(field.name(), field.value(), *field.inline());
    }
    if let Some(image) = page.image() {
        embed = embed.image(image);
    }
    if let Some(thumbnail) = page.thumbnail() {
        embed = embed.thumbnail(thumbnail);
    }
    if let Some(footer) = page.footer() {
        embed = embed.footer(CreateEmbedFooter::new(footer));
    }
    embed
}

fn button_style(style: ControlStyle) -> ButtonStyle {
    match style {
        ControlStyle::Primary => ButtonStyle::Primary,
        ControlStyle::Success => ButtonStyle::Success,
        ControlStyle::Danger => ButtonStyle::Danger,
        // Link style only applies to URL buttons, which get it from `new_link`
        ControlStyle::Secondary | ControlStyle::Link => ButtonStyle::Secondary,
    }
}

/// Build a single button.
pub fn button(control: &RenderedControl) -> CreateButton {
    let mut button = match control.target() {
        ControlTarget::Callback(id) => {
            CreateButton::new(id.as_str()).style(button_style(*control.style()))
        }
        ControlTarget::Link(url) => CreateButton::new_link(url.as_str()),
    };
    if let Some(label) = control.label() {
        button = button.label(label.as_str());
    }
    if let Some(emoji) = control.emoji() {
        button = button.emoji(ReactionType::Unicode(emoji.clone()));
    }
    button.disabled(*control.disabled())
}

/// Build the action rows of a view.
pub fn components(view: &RenderedView) -> Vec<CreateActionRow> {
    view.rows()
        .iter()
        .map(|row| CreateActionRow::Buttons(row.iter().map(button).collect()))
        .collect()
}

/// Message for the first render of a navigator.
pub fn create_message(view: &RenderedView) -> CreateMessage {
    let message = CreateMessage::new().components(components(view));
    match view.page() {
        Page::Text(content) => message.content(content.as_str()),
        Page::Embed(page) => message.embed(embed(page)),
    }
}

/// Edit replacing the page and controls of an existing message.
///
/// Switching between text and embed pages clears the other kind of content.
pub fn edit_message(view: &RenderedView) -> EditMessage {
    let message = EditMessage::new().components(components(view));
    match view.page() {
        Page::Text(content) => message.content(content.as_str()).embeds(Vec::new()),
        Page::Embed(page) => message.content("").embed(embed(page)),
    }
}

/// Edit removing every control, leaving the content in place.
pub fn strip_message() -> EditMessage {
    EditMessage::new().components(Vec::new())
}

/// Whether an activation's notice is shown only to the person who pressed.
///
/// Ownership rejections are private; a failed preview fetch is posted in the
/// channel so everyone reading the message sees why nothing changed.
pub fn is_private_notice(activation: &Activation) -> bool {
    matches!(activation, Activation::Rejected(_))
}

/// Follow-up carrying an activation's notice, if it has one.
pub fn notice_followup(activation: &Activation) -> Option<CreateInteractionResponseFollowup> {
    let notice = activation.notice()?;
    Some(
        CreateInteractionResponseFollowup::new()
            .content(notice)
            .ephemeral(is_private_notice(activation)),
    )
}
