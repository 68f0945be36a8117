//! Word lists for locations and merchant names.

use rand::seq::SliceRandom;
use rand::Rng;

/// Country names drawn for fraudulent transactions.
pub const COUNTRIES: &[&str] = &[
    "Afghanistan", "Albania", "Algeria", "Angola", "Argentina", "Armenia", "Australia",
    "Austria", "Azerbaijan", "Bahamas", "Bangladesh", "Belarus", "Belgium", "Bolivia",
    "Brazil", "Bulgaria", "Cambodia", "Cameroon", "Canada", "Chile", "China", "Colombia",
    "Costa Rica", "Croatia", "Cuba", "Cyprus", "Czech Republic", "Denmark",
    "Dominican Republic", "Ecuador", "Egypt", "El Salvador", "Estonia", "Ethiopia", "Fiji",
    "Finland", "France", "Georgia", "Germany", "Ghana", "Greece", "Guatemala", "Haiti",
    "Honduras", "Hungary", "Iceland", "India", "Indonesia", "Iran", "Iraq", "Ireland",
    "Israel", "Italy", "Jamaica", "Japan", "Jordan", "Kazakhstan", "Kenya", "Kuwait",
    "Latvia", "Lebanon", "Libya", "Lithuania", "Luxembourg", "Madagascar", "Malaysia",
    "Mali", "Malta", "Mexico", "Monaco", "Mongolia", "Morocco", "Mozambique", "Myanmar",
    "Nepal", "Netherlands", "New Zealand", "Nicaragua", "Nigeria", "Norway", "Pakistan",
    "Panama", "Paraguay", "Peru", "Philippines", "Poland", "Portugal", "Qatar", "Romania",
    "Russian Federation", "Saudi Arabia", "Senegal", "Serbia", "Singapore", "Slovakia",
    "Slovenia", "South Africa", "Spain", "Sri Lanka", "Sudan", "Sweden", "Switzerland",
    "Syria", "Taiwan", "Tanzania", "Thailand", "Tunisia", "Turkey", "Uganda", "Ukraine",
    "United Arab Emirates", "United Kingdom", "United States of America", "Uruguay",
    "Uzbekistan", "Venezuela", "Vietnam", "Yemen", "Zambia", "Zimbabwe",
];

const SURNAMES: &[&str] = &[
    "Adams", "Allen", "Baker", "Barnes", "Bell", "Brooks", "Brown", "Campbell", "Carter",
    "Clark", "Collins", "Cook", "Cooper", "Davis", "Edwards", "Evans", "Fisher", "Flores",
    "Garcia", "Gonzalez", "Gray", "Green", "Hall", "Harris", "Hernandez", "Hill", "Hodges",
    "Howard", "Hughes", "Jackson", "James", "Johnson", "Kelly", "King", "Lee", "Lewis",
    "Lopez", "Martin", "Martinez", "Miller", "Mitchell", "Moore", "Morgan", "Morris",
    "Murphy", "Nelson", "Ortiz", "Parker", "Perez", "Phillips", "Price", "Ramirez", "Reed",
    "Rivera", "Roberts", "Robinson", "Rodriguez", "Rogers", "Sanchez", "Scott", "Smith",
    "Stewart", "Taylor", "Thomas", "Thompson", "Torres", "Turner", "Walker", "Ward",
    "Watson", "White", "Wilkins", "Williams", "Wilson", "Wood", "Wright", "Young",
];

const COMPANY_SUFFIXES: &[&str] = &["Inc", "and Sons", "LLC", "Group", "PLC", "Ltd"];

fn pick<'a, R: Rng + ?Sized>(rng: &mut R, words: &[&'a str]) -> &'a str {
    // Every list above is non-empty.
    words.choose(rng).copied().unwrap_or_default()
}

/// A random country name.
pub fn country<R: Rng + ?Sized>(rng: &mut R) -> String {
    pick(rng, COUNTRIES).to_string()
}

/// A random company-style merchant name.
pub fn company<R: Rng + ?Sized>(rng: &mut R) -> String {
    match rng.gen_range(0..3) {
        0 => format!("{} {}", pick(rng, SURNAMES), pick(rng, COMPANY_SUFFIXES)),
        1 => format!("{}-{}", pick(rng, SURNAMES), pick(rng, SURNAMES)),
        _ => format!(
            "{}, {} and {}",
            pick(rng, SURNAMES),
            pick(rng, SURNAMES),
            pick(rng, SURNAMES)
        ),
    }
}
