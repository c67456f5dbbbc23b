//! Built-in starch pool used for fresh installs and `reset`.

use super::Starch;

/// Emoji given to new starches when the user does not pick one.
pub const DEFAULT_EMOJI: &str = "🍞";

/// Palette offered by the add/edit prompts.
pub const COMMON_EMOJIS: [&str; 40] = [
    "🍞", "🥖", "🥯", "🥐", "🫓", "🍕", "🌮", "🌯", "🥟", "🫔", "🍝", "🍜", "🍚", "🍣", "🥘",
    "🍟", "🥔", "🌽", "🥞", "🧇", "🍩", "🧁", "🍰", "🍿", "🍘", "🥣", "🧀", "🧈", "🥙", "🍥",
    "🥧", "🍤", "🥡", "🥪", "🫕", "🍲", "🍛", "🥗", "🧆", "🥮",
];

const DEFAULT_ENTRIES: [(&str, &str); 66] = [
    // Breads & baked
    ("Bagel", "🥯"),
    ("Sourdough", "🍞"),
    ("Baguette", "🥖"),
    ("Croissant", "🥐"),
    ("Pretzel", "🥨"),
    ("Naan", "🫓"),
    ("Pita", "🫓"),
    ("Focaccia", "🍞"),
    ("Cornbread", "🌽"),
    ("Biscuit", "🧈"),
    ("Dinner Roll", "🍞"),
    ("English Muffin", "🫓"),
    // Pasta & noodles
    ("Spaghetti", "🍝"),
    ("Ramen", "🍜"),
    ("Mac & Cheese", "🧀"),
    ("Lasagna", "🍝"),
    ("Ravioli", "🥟"),
    ("Gnocchi", "🥔"),
    ("Udon", "🍜"),
    ("Pho", "🍜"),
    ("Pad Thai", "🍜"),
    ("Lo Mein", "🍜"),
    // Potatoes
    ("French Fries", "🍟"),
    ("Mashed Potatoes", "🥔"),
    ("Baked Potato", "🥔"),
    ("Tater Tots", "🥔"),
    ("Hash Browns", "🥔"),
    ("Potato Chips", "🥔"),
    ("Loaded Fries", "🍟"),
    ("Potato Wedges", "🥔"),
    // Rice & grains
    ("Fried Rice", "🍚"),
    ("Sushi Rice", "🍣"),
    ("Risotto", "🍚"),
    ("Paella", "🥘"),
    ("Congee", "🍚"),
    ("Bibimbap", "🍚"),
    ("Oatmeal", "🥣"),
    ("Polenta", "🌽"),
    // Dumplings & wrapped
    ("Dumplings", "🥟"),
    ("Pierogi", "🥟"),
    ("Empanada", "🥟"),
    ("Samosa", "🥟"),
    ("Spring Roll", "🥟"),
    ("Tamale", "🫔"),
    ("Arepa", "🫓"),
    ("Pupusa", "🫓"),
    // Flatbreads & tortillas
    ("Pizza", "🍕"),
    ("Taco", "🌮"),
    ("Burrito", "🌯"),
    ("Quesadilla", "🧀"),
    ("Crepe", "🥞"),
    ("Injera", "🫓"),
    // Breakfast & sweet
    ("Pancakes", "🥞"),
    ("Waffles", "🧇"),
    ("Donut", "🍩"),
    ("Churro", "🍩"),
    ("Funnel Cake", "🍰"),
    ("Scone", "🧁"),
    ("Crumpet", "🧇"),
    ("Cinnamon Roll", "🥐"),
    // Snacks & other
    ("Popcorn", "🍿"),
    ("Crackers", "🍘"),
    ("Breadsticks", "🥖"),
    ("Mantou", "🫓"),
    ("Couscous", "🥘"),
    ("Grits", "🌽"),
];

/// The compiled-in starch list, ids "1" through "66" in catalogue order.
pub fn default_starches() -> Vec<Starch> {
    DEFAULT_ENTRIES
        .iter()
        .enumerate()
        .map(|(i, (name, emoji))| Starch::new((i + 1).to_string(), name, emoji))
        .collect()
}
