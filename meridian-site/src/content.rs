//! Copy and media shown on the site.

pub const SITE_NAME: &str = "Meridian";
pub const TAGLINE: &str = "Design studio for calm, useful products";
pub const INTRO: &str = "We help teams plan, build and ship websites that are quick to load \
    and easy to live with.";

pub struct Slide {
    pub title: &'static str,
    pub caption: &'static str,
    pub image: &'static str,
}

pub const SLIDES: &[Slide] = &[
    Slide {
        title: "Strategy",
        caption: "Workshops that turn loose ideas into a plan.",
        image: "img/slides/strategy.jpg",
    },
    Slide {
        title: "Design",
        caption: "Interfaces shaped around the people using them.",
        image: "img/slides/design.jpg",
    },
    Slide {
        title: "Engineering",
        caption: "Fast, accessible front ends built to last.",
        image: "img/slides/engineering.jpg",
    },
];

pub const MISSION: &str = "Meridian started as two friends sharing a desk and a belief that \
    good websites should feel effortless. Ten years on, the belief has not changed.";

pub const VALUES: &[(&str, &str)] = &[
    ("Clarity", "Say what matters, then stop."),
    ("Care", "Sweat the details nobody asks about."),
    ("Candour", "Share bad news early."),
];

pub struct Member {
    pub name: &'static str,
    pub role: &'static str,
}

pub const TEAM: &[Member] = &[
    Member {
        name: "Ada Moreno",
        role: "Founder, design lead",
    },
    Member {
        name: "Tom Okafor",
        role: "Founder, engineering lead",
    },
    Member {
        name: "Lin Zhou",
        role: "Producer",
    },
];

pub struct Article {
    pub title: &'static str,
    pub date: &'static str,
    pub summary: &'static str,
}

pub const ARTICLES: &[Article] = &[
    Article {
        title: "We moved studios",
        date: "2024-09-02",
        summary: "Find us by the river, with more light and a better coffee machine.",
    },
    Article {
        title: "Case study: a booking flow in half the steps",
        date: "2024-06-18",
        summary: "How a regional theatre cut abandoned checkouts by a third.",
    },
    Article {
        title: "Hiring: front-end engineer",
        date: "2024-04-05",
        summary: "Join a small team that ships carefully and often.",
    },
];

pub struct Photo {
    pub src: &'static str,
    pub alt: &'static str,
}

pub const PHOTOS: &[Photo] = &[
    Photo {
        src: "img/gallery/studio.jpg",
        alt: "The studio at dawn",
    },
    Photo {
        src: "img/gallery/workshop.jpg",
        alt: "A planning workshop",
    },
    Photo {
        src: "img/gallery/sketches.jpg",
        alt: "Wireframe sketches on the wall",
    },
    Photo {
        src: "img/gallery/launch.jpg",
        alt: "Launch day",
    },
];

pub const CONTACT_EMAIL: &str = "hello@meridian.example";
pub const CONTACT_ADDRESS: &str = "12 River Walk, Harbour District";
