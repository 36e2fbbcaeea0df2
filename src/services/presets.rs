//! Static style, country and catalog tables used when building queries and
//! serving demo results.

use crate::models::{Category, Gender, Locale, Style};

/// Currency used when the country is unknown and no override is given
pub const DEFAULT_CURRENCY: &str = "EUR";

/// Country whose shops and locale are used for unlisted countries
pub const BASELINE_COUNTRY: &str = "NL";

const BASELINE_LOCALE: Locale = Locale { gl: "nl", hl: "nl" };

/// Colors a style naturally works with
pub fn style_palette(style: Style) -> &'static [&'static str] {
    match style {
        Style::Minimalistisch => &["black", "white", "navy", "grey", "stone"],
        Style::Casual => &["navy", "olive", "white", "grey", "denim"],
        Style::Klassiek => &["navy", "camel", "white", "light blue", "grey"],
        Style::Sportief => &["black", "charcoal", "white", "cobalt"],
        Style::Creatief => &["navy", "rust", "sage", "cream", "ink"],
    }
}

/// Base search keywords for a category
pub fn category_keywords(category: Category) -> &'static [&'static str] {
    match category {
        Category::Outer => &["overshirt", "light jacket", "blazer", "shacket"],
        Category::Top1 => &["oxford shirt", "knit sweater", "merino sweater", "blouse"],
        Category::Top2 => &["shirt", "crewneck", "henley", "blouse"],
        Category::Bottom => &["chino", "trousers", "jeans"],
        Category::Shoes => &["sneakers", "derby", "loafers"],
        Category::Tee => &["heavy cotton t-shirt", "white tee"],
        Category::Accessory => &["leather belt", "scarf", "beanie"],
    }
}

/// Extra keywords a style adds to a category
pub fn style_modifiers(style: Style, category: Category) -> &'static [&'static str] {
    match (style, category) {
        (Style::Minimalistisch, Category::Outer) => &["unstructured", "clean"],
        (Style::Minimalistisch, Category::Bottom) => &["tapered"],
        (Style::Minimalistisch, Category::Shoes) => &["minimal"],
        (Style::Casual, Category::Outer) => &["overshirt"],
        (Style::Casual, Category::Bottom) => &["jeans", "chino"],
        (Style::Casual, Category::Shoes) => &["sneakers"],
        (Style::Klassiek, Category::Outer) => &["blazer"],
        (Style::Klassiek, Category::Bottom) => &["chino"],
        (Style::Klassiek, Category::Shoes) => &["derby", "loafer"],
        (Style::Sportief, Category::Outer) => &["track jacket"],
        (Style::Sportief, Category::Bottom) => &["joggers"],
        (Style::Sportief, Category::Shoes) => &["trainers", "running"],
        (Style::Creatief, Category::Outer) => &["pattern"],
        (Style::Creatief, Category::Accessory) => &["accent color"],
        _ => &[],
    }
}

/// Search terms for a gender; the first one goes into queries
pub fn gender_terms(gender: Gender) -> &'static [&'static str] {
    match gender {
        Gender::Male => &["men", "heren"],
        Gender::Female => &["women", "dames"],
        Gender::Unisex | Gender::NonBinary => &["unisex"],
    }
}

/// Currency for an upper-cased country code
pub fn currency_for(country: &str) -> &'static str {
    match country {
        "NL" | "BE" | "DE" | "FR" | "ES" | "IT" | "IE" => "EUR",
        "UK" | "GB" => "GBP",
        "US" => "USD",
        "SE" => "SEK",
        _ => DEFAULT_CURRENCY,
    }
}

/// Retailer domains searched for an upper-cased country code
pub fn country_shops(country: &str) -> &'static [&'static str] {
    match country {
        "NL" => &[
            "zalando.nl",
            "aboutyou.nl",
            "wehkamp.nl",
            "hm.com",
            "decathlon.nl",
            "uniqlo.com",
        ],
        "BE" => &[
            "zalando.be",
            "aboutyou.be",
            "debijenkorf.be",
            "hm.com",
            "decathlon.be",
        ],
        "DE" => &["zalando.de", "aboutyou.de", "hm.com", "otto.de", "uniqlo.com"],
        "FR" => &["zalando.fr", "hm.com", "laredoute.fr", "decathlon.fr"],
        "UK" | "GB" => &[
            "zalando.co.uk",
            "hm.com",
            "johnlewis.com",
            "next.co.uk",
            "uniqlo.com",
        ],
        "US" => &[
            "amazon.com",
            "nordstrom.com",
            "gap.com",
            "uniqlo.com",
            "macys.com",
        ],
        _ => country_shops(BASELINE_COUNTRY),
    }
}

/// Shopping-search locale for an upper-cased country code
pub fn locale_for(country: &str) -> Locale {
    let (gl, hl) = match country {
        "NL" => ("nl", "nl"),
        "BE" => ("be", "nl"),
        "DE" => ("de", "de"),
        "FR" => ("fr", "fr"),
        "UK" | "GB" => ("uk", "en"),
        "US" => ("us", "en"),
        "IE" => ("ie", "en"),
        "ES" => ("es", "es"),
        "IT" => ("it", "it"),
        "SE" => ("se", "sv"),
        _ => return BASELINE_LOCALE,
    };
    Locale { gl, hl }
}

/// Entry of the offline demo catalog
#[derive(Debug, Clone, Copy)]
pub struct DemoItem {
    pub category: Category,
    pub title: &'static str,
    pub price: f64,
    pub gender: Gender,
    pub styles: &'static [Style],
    pub color: &'static str,
}

const fn demo(
    category: Category,
    title: &'static str,
    price: f64,
    gender: Gender,
    styles: &'static [Style],
    color: &'static str,
) -> DemoItem {
    DemoItem {
        category,
        title,
        price,
        gender,
        styles,
        color,
    }
}

/// Merchant label for demo items
pub const DEMO_MERCHANT: &str = "demo";

use Category::*;
use Gender::{Female, Male, Unisex};
use Style::*;

pub static DEMO_CATALOG: [DemoItem; 20] = [
    demo(Outer, "Navy overshirt (demo)", 55.0, Male, &[Casual, Minimalistisch], "navy"),
    demo(Outer, "Cream blazer (demo)", 65.0, Female, &[Klassiek, Minimalistisch], "cream"),
    demo(Outer, "Black track jacket (demo)", 45.0, Unisex, &[Sportief], "black"),
    demo(Top1, "Light blue oxford shirt (demo)", 35.0, Male, &[Klassiek, Casual], "light blue"),
    demo(Top1, "Merino sweater grey (demo)", 40.0, Unisex, &[Minimalistisch, Klassiek], "grey"),
    demo(Top1, "Blouse cream (demo)", 30.0, Female, &[Klassiek, Minimalistisch], "cream"),
    demo(Top2, "Crewneck navy (demo)", 28.0, Unisex, &[Casual, Minimalistisch], "navy"),
    demo(Top2, "Henley white (demo)", 22.0, Male, &[Casual], "white"),
    demo(Top2, "Knit sweater sage (demo)", 32.0, Female, &[Creatief, Klassiek], "sage"),
    demo(Bottom, "Stretch chino olive (demo)", 45.0, Male, &[Casual, Klassiek], "olive"),
    demo(Bottom, "High-rise trousers camel (demo)", 48.0, Female, &[Klassiek], "camel"),
    demo(Bottom, "Black joggers (demo)", 35.0, Unisex, &[Sportief], "black"),
    demo(Shoes, "Lightweight sneakers white (demo)", 30.0, Unisex, &[Casual, Sportief], "white"),
    demo(Shoes, "Leather loafers cognac (demo)", 55.0, Male, &[Klassiek], "cognac"),
    demo(Shoes, "Minimal sneakers black (demo)", 40.0, Unisex, &[Minimalistisch], "black"),
    demo(Tee, "Heavy cotton tee white (demo)", 12.0, Unisex, &[Casual, Minimalistisch], "white"),
    demo(Tee, "Heavy cotton tee black (demo)", 12.0, Unisex, &[Minimalistisch], "black"),
    demo(Accessory, "Leather belt cognac (demo)", 18.0, Male, &[Klassiek, Casual], "cognac"),
    demo(Accessory, "Wool scarf navy (demo)", 20.0, Unisex, &[Klassiek, Minimalistisch], "navy"),
    demo(Accessory, "Beanie grey (demo)", 15.0, Unisex, &[Casual], "grey"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_category_has_keywords_and_demo_items() {
        for category in Category::ALL {
            assert!(!category_keywords(category).is_empty());
            assert!(DEMO_CATALOG.iter().any(|item| item.category == category));
        }
    }

    #[test]
    fn test_unlisted_country_uses_baseline() {
        assert_eq!(country_shops("PL"), country_shops("NL"));
        assert_eq!(locale_for("PL"), Locale { gl: "nl", hl: "nl" });
        assert_eq!(currency_for("PL"), "EUR");
    }

    #[test]
    fn test_gb_aliases_uk() {
        assert_eq!(country_shops("GB"), country_shops("UK"));
        assert_eq!(locale_for("GB").hl, "en");
        assert_eq!(currency_for("GB"), "GBP");
    }

    #[test]
    fn test_every_style_palette_has_four_colors() {
        for style in [Minimalistisch, Casual, Klassiek, Sportief, Creatief] {
            assert!(style_palette(style).len() >= 4);
        }
    }
}
