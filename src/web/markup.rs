use crate::{
    domain::Announcement,
    error::Result,
    service::{
        announcement_renderer::{AnnouncementView, LinkPlacement, MessageBody},
        AnnouncementRenderer, AnnouncementService, DisplayRequest,
    },
};

pub const NO_ANNOUNCEMENTS: &str = "<ul><li>There are currently no announcements.</li></ul>";

/// Shipped with every non-empty fragment so the show more/less controls work
/// on any host page. Each truncated block carries a hidden checkbox ahead of
/// its brief and full paragraphs; the labels flip it.
pub const FRAGMENT_STYLE: &str = concat!(
    "<style>",
    ".megaphone-header{overflow:hidden}",
    ".megaphone-subject{display:inline}",
    ".megaphone-small{font-size:smaller}",
    ".megaphone-sent{float:right;font-size:smaller}",
    ".megaphone-signature{color:#808080;font-size:smaller}",
    ".megaphone-link{font-size:smaller;padding-left:2em}",
    ".megaphone-message label{cursor:pointer;text-decoration:underline}",
    ".megaphone-full{display:none}",
    ".megaphone-toggle:checked ~ .megaphone-brief{display:none}",
    ".megaphone-toggle:checked ~ .megaphone-full{display:block}",
    "</style>",
);

/// Markup for every open announcement addressed to `audience`, newest first.
pub async fn show_announcements(service: &AnnouncementService, audience: &str) -> Result<String> {
    show_announcements_with(service, audience, DisplayRequest::default()).await
}

pub async fn show_announcements_with(
    service: &AnnouncementService,
    audience: &str,
    request: DisplayRequest,
) -> Result<String> {
    let views = service.announcement_views(audience, request).await?;
    Ok(announcements_markup(&views))
}

/// Markup for already fetched records, everything collapsed except `expanded`.
pub fn render(renderer: &AnnouncementRenderer, records: &[Announcement], expanded: Option<i64>) -> String {
    announcements_markup(&renderer.prepare(records, expanded))
}

/// Markup for a list of prepared announcements, one block each, in order.
pub fn announcements_markup(views: &[AnnouncementView]) -> String {
    if views.is_empty() {
        return NO_ANNOUNCEMENTS.to_string();
    }

    let mut html = String::from(FRAGMENT_STYLE);
    for view in views {
        html.push_str(&announcement_block(view));
    }
    html
}

fn announcement_block(view: &AnnouncementView) -> String {
    let mut html = String::new();
    html.push_str(&format!(
        r#"<div class="megaphone-announcement" id="announcement-{}" style="background-color: #F0F0F0; border: solid 1px #F0F0F0; margin-bottom: 3px;"><div class="megaphone-inner" style="margin: 15px;">"#,
        view.id
    ));
    html.push_str(r#"<div class="megaphone-header">"#);

    html.push_str(&format!(r#"<h4 class="megaphone-subject">{}</h4>"#, view.subject));

    if let Some(link) = view.link.as_ref().filter(|l| l.placement == LinkPlacement::Inline) {
        html.push_str(&format!(
            r#"&nbsp;<span class="megaphone-small">(<a href="{}">link</a>)</span>"#,
            escape_attr(&link.url)
        ));
    }

    html.push_str(&format!(
        r#"<span class="megaphone-sent">({}<span class="megaphone-signature"> ~ by <a href="mailto:{}">{}</a></span>)</span>"#,
        view.sent,
        escape_attr(&view.author_email),
        view.author_name
    ));

    if let Some(link) = view.link.as_ref().filter(|l| l.placement == LinkPlacement::Line) {
        html.push_str(&format!(
            r#"<div class="megaphone-link">(<a href="{}">{}</a>)</div>"#,
            escape_attr(&link.url),
            link.url
        ));
    }
    html.push_str("</div>");

    match &view.body {
        MessageBody::Full { text } => {
            html.push_str(&format!(
                r#"<p class="megaphone-message" id="messagebrief-{}">{}</p>"#,
                view.id,
                nl2br(text)
            ));
        }
        MessageBody::Truncated { brief, full } => {
            html.push_str(&format!(
                r#"<input type="checkbox" class="megaphone-toggle" id="megaphone-expand-{id}" hidden{checked}>"#,
                id = view.id,
                checked = if view.expanded { " checked" } else { "" },
            ));
            html.push_str(&format!(
                r#"<p class="megaphone-message megaphone-brief" id="messagebrief-{id}">{brief}&nbsp;<span class="megaphone-small">[<label for="megaphone-expand-{id}">show more</label>]</span></p>"#,
                id = view.id,
                brief = nl2br(brief),
            ));
            html.push_str(&format!(
                r#"<p class="megaphone-message megaphone-full" id="messagefull-{id}">{full}&nbsp;<span class="megaphone-small">[<label for="megaphone-expand-{id}">show less</label>]</span></p>"#,
                id = view.id,
                full = nl2br(full),
            ));
        }
    }

    if let Some(closing_date) = &view.closing_date {
        html.push_str(&format!(
            r#"<p><span class="megaphone-small">Closing date: {}</span></p>"#,
            closing_date
        ));
    }

    html.push_str("</div></div>");
    html
}

/// Insert `<br />` before every line break.
pub fn nl2br(text: &str) -> String {
    text.replace("\r\n", "\n")
        .replace('\r', "\n")
        .replace('\n', "<br />\n")
}

/// Keep attribute values inside their quotes.
fn escape_attr(value: &str) -> String {
    value
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
