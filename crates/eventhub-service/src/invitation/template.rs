//! Invitation mail rendering.

use eventhub_entity::event::Event;

/// Longest description excerpt carried in an invitation.
const EXCERPT_LENGTH: usize = 120;

/// The parts of an event an invitation shows, ready to render.
#[derive(Debug, Clone)]
pub struct Invitation<'a> {
    event: &'a Event,
    link: String,
}

impl<'a> Invitation<'a> {
    /// Prepare an invitation for `event` pointing at `link`.
    pub fn new(event: &'a Event, link: String) -> Self {
        Self { event, link }
    }

    /// `Invitation: {name}`.
    pub fn subject(&self) -> String {
        format!("Invitation: {}", self.event.name)
    }

    /// Render the HTML body, greeting `username` when known.
    pub fn render(&self, username: Option<&str>) -> String {
        let greeting = match username.map(str::trim).filter(|u| !u.is_empty()) {
            Some(name) => format!("Hello {},", escape(name)),
            None => "Hello,".to_string(),
        };
        let date = self.event.start_date.format("%d-%m-%Y");
        let time = match self.event.start_time.trim() {
            "" => "TBD",
            t => t,
        };
        let excerpt = escape(&excerpt(&self.event.description));

        format!(
            "<p>{greeting}</p>\
             <p>You are cordially invited to {name}!</p>\
             <p>Event Details:</p>\
             <ul>\
             <li>Date: {date}</li>\
             <li>Time: {time}</li>\
             <li>Description: {excerpt}</li>\
             </ul>\
             <p>To know more, follow the link below:<br>\
             <a href=\"{link}\">{link}</a></p>\
             <p>We look forward to seeing you!</p>\
             <p>Best regards,<br>The Event Team</p>",
            name = escape(&self.event.name),
            time = escape(time),
            link = self.link,
        )
    }
}

/// Remove markup tags, keeping the text between them.
pub fn strip_tags(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}

/// Plain-text excerpt of an HTML description.
fn excerpt(description: &str) -> String {
    let plain = strip_tags(description);
    let plain = plain.trim();
    if plain.chars().count() > EXCERPT_LENGTH {
        let cut: String = plain.chars().take(EXCERPT_LENGTH).collect();
        format!("{cut}...")
    } else {
        plain.to_string()
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
