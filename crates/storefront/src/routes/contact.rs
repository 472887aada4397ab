//! Contact page.

use askama::Template;
use askama_web::WebTemplate;

use crate::middleware::Nav;

/// One way to reach the shop.
#[derive(Clone)]
pub struct ContactChannel {
    pub label: &'static str,
    pub value: &'static str,
    pub href: &'static str,
}

/// Contact channels in display order.
pub const CHANNELS: [ContactChannel; 4] = [
    ContactChannel {
        label: "Correo",
        value: "demo@lareyna.com",
        href: "mailto:demo@lareyna.com",
    },
    ContactChannel {
        label: "WhatsApp",
        value: "(+34) 947 002 963",
        href: "https://wa.me/34947002963",
    },
    ContactChannel {
        label: "Instagram",
        value: "@lareyna",
        href: "https://instagram.com/lareyna",
    },
    ContactChannel {
        label: "Facebook",
        value: "La Reyna Oficial",
        href: "https://facebook.com/LaReynaOficial",
    },
];

/// Contact page template.
#[derive(Template, WebTemplate)]
#[template(path = "contact.html")]
pub struct ContactTemplate {
    pub nav: Nav,
    pub channels: Vec<ContactChannel>,
}

/// Display the contact page.
pub async fn contact(nav: Nav) -> ContactTemplate {
    ContactTemplate {
        nav,
        channels: CHANNELS.to_vec(),
    }
}
