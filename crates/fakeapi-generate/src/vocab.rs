//! Fixed vocabularies the generators draw from.

pub const FILLER_WORDS: &[&str] = &[
    "lorem",
    "ipsum",
    "dolor",
    "sit",
    "amet",
    "consectetur",
    "adipiscing",
    "elit",
    "sed",
    "do",
    "eiusmod",
    "tempor",
    "incididunt",
    "ut",
    "labore",
];

pub const EMAIL_NAMES: &[&str] = &[
    "john", "jane", "bob", "alice", "charlie", "diana", "eve", "frank",
];

pub const EMAIL_DOMAINS: &[&str] = &["example.com", "test.com", "demo.com", "mail.com"];

pub const FIRST_NAMES: &[&str] = &[
    "João", "Maria", "Pedro", "Ana", "Carlos", "Juliana", "Lucas", "Fernanda", "Rafael", "Camila",
    "Bruno", "Beatriz",
];

pub const LAST_NAMES: &[&str] = &[
    "Silva",
    "Santos",
    "Oliveira",
    "Souza",
    "Rodrigues",
    "Ferreira",
    "Alves",
    "Pereira",
    "Lima",
    "Gomes",
];

pub const URL_DOMAINS: &[&str] = &["example.com", "test.com", "demo.com", "website.com"];

pub const URL_PATHS: &[&str] = &["home", "about", "contact", "products", "services", "blog"];

pub const IMAGE_HOST: &str = "picsum.photos";

pub const IMAGE_SIZES: &[u32] = &[200, 300, 400, 500];
