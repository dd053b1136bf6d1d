//! Canonical category taxonomy.
//!
//! Every retailer invents its own aisle labels; this maps the ~150 labels we
//! have observed onto a fixed set of 15 canonical categories. Unknown labels
//! fall back to `"Miscellaneous"` and are reported through a `tracing` event
//! so the table can be curated later — the lookup itself stays pure.

/// The fixed canonical category set, in display order.
pub const CANONICAL_CATEGORIES: &[&str] = &[
    "Produce",
    "Dairy & Eggs",
    "Bakery & Bread",
    "Meat & Seafood",
    "Frozen Foods",
    "Pantry & Dry Goods",
    "Beverages",
    "Snacks & Desserts",
    "Household & Personal Care",
    "Deli & Prepared Foods",
    "Baby & Child",
    "Seasonal & Special",
    "Alcohol & Tobacco",
    "Pet Supplies",
    "Miscellaneous",
];

/// Many-to-one mapping from retailer labels to canonical categories.
#[rustfmt::skip]
const CATEGORY_TABLE: &[(&str, &[&str])] = &[
    ("Baby & Child", &[
        "Baby",
        "Baby Items",
        "Baby & Kids",
    ]),
    ("Bakery & Bread", &[
        "Bakery",
        "Breads & Cakes",
        "Bread & Bakery",
        "Tortillas & Flatbreads",
        "Loaves, Rolls, Buns",
        "Sliced Bread",
        "Bagels",
        "Sweet Stuff",
        "Bakery Desserts",
        "Breakfast Bakery",
        "Buns & Rolls",
        "Bakery & Bread",
        "Tortillas & Flat Bread",
        "Bread",
        "Breads & Doughs",
    ]),
    ("Beverages", &[
        "Water",
        "Tea & Hot Chocolate",
        "Soft Drinks",
        "Sports & Energy Drinks",
        "Juices",
        "Coffee",
        "Drink Mixes & Water Enhancers",
        "Nutritional Drinks",
        "Beverages",
        "Frozen Juices",
        "Water (Sparkling & Still)",
        "Coffee & Tea",
        "Juices & More",
        "Sodas & Mixers",
        "Non-Dairy Bev",
        "Fresh Juice",
    ]),
    ("Dairy & Eggs", &[
        "Dairy, Cheese & Eggs",
        "Dairy & Eggs",
        "Milk & Cream",
        "Yogurt, etc.",
        "Butter",
        "Eggs",
        "Slices, Shreds, Crumbles",
        "Wedges, Wheels, Loaves, Logs",
        "Cream and Creamy Cheeses",
    ]),
    ("Deli & Prepared Foods", &[
        "Prepared Foods",
        "Delicatessen",
        "Deli",
        "Deli & Prepared Food",
        "Custom Orders",
        "Packaged Meals & Sides",
        "Wraps, Burritos & Sandwiches",
        "Salads, Soups & Sides",
        "Entrées & Center of Plate",
        "Soup, Chili & Meals",
        "Dip/Spread",
    ]),
    ("Frozen Foods", &[
        "Ice Cream, Desserts & Toppings",
        "Frozen Meat Substitutes",
        "Frozen Fruits & Vegetables",
        "Frozen Pizza",
        "Frozen Meals & Entrees",
        "Frozen Meat & Seafood",
        "Ice",
        "Frozen Foods",
        "Frozen",
        "Appetizers",
        "Cool Desserts",
        "Fruit & Vegetables",
        "Entrées & Sides",
        "Frozen Pizza & Meals",
        "Appetizers & Sides",
        "Dessert, Ice Cream & Ice",
    ]),
    ("Meat & Seafood", &[
        "Meat & Seafood",
        "Fresh Meat & Seafood",
        "Chicken & Turkey",
        "Fish & Seafood",
        "Beef, Pork & Lamb",
        "Plant-based Protein",
        "Hot Dogs, Bacon & Sausage",
        "Packaged Poultry",
        "Seafood",
        "All Natural Poultry",
        "Packaged Meat",
        "All Natural Pork",
        "All Natural Meat",
        "Packaged Seafood",
        "Vegan & Vegetarian",
    ]),
    ("Pantry & Dry Goods", &[
        "Bulk Foods",
        "Canned & Jarred Foods",
        "Breakfast Foods",
        "Cooking & Baking",
        "Pantry Essentials",
        "Breakfast & Cereals",
        "Pantry",
        "International Foods",
        "Grains & Pasta",
        "Condiments & Salad Dressing",
        "Spices",
        "For Baking & Cooking",
        "Oils & Vinegars",
        "Condiments",
        "Dressing & Seasoning",
        "Salsa & Hot Sauce",
        "BBQ, Pasta, Simmer",
        "Nut Butters & Fruit Spreads",
        "Pastas & Grains",
        "Honeys, Syrups & Nectars",
        "Cereals",
        "Packaged Fish, Meat, Fruit & Veg",
        "Packaged Vegetables & Fruits",
        "Breakfast",
    ]),
    ("Produce", &[
        "Produce",
        "Fresh Produce",
        "Fruits & Vegetables",
        "Fruits",
        "Veggies",
        "Fresh Vegetables",
        "Fresh Herbs",
        "Fresh Fruits",
    ]),
    ("Snacks & Desserts", &[
        "Snack Foods",
        "Snacks",
        "Candy",
        "Candy & Chocolate",
        "Candies & Cookies",
        "Snacks & Sweets",
        "Nuts, Dried Fruits, Seeds",
        "Bars, Jerky &… Surprises",
        "Packaged for Snacking",
        "Chips, Crackers & Crunchy Bites",
    ]),
    ("Household & Personal Care", &[
        "Laundry & Cleaning",
        "Health Care",
        "Vitamins & Supplements",
        "Paper & Plastic",
        "Personal Care",
        "Household Supplies",
        "Household Essentials",
        "Beauty Care",
        "Hardware & Auto",
        "Kitchen & Dining",
        "Clothing",
        "Reading",
        "For the Face & Body",
        "Nutritional Supplements",
        "Fish Oils",
        "Digestive Aids",
        "Mood & Sleep",
        "Seasonal Wellness & Immune",
        "Homeopathy",
        "Children's Vitamins",
        "Weight Loss & Diet",
        "Children's Health",
        "Children's Supplements",
        "Single Vitamins",
        "Cleanse & Detox",
        "Women's & Men's Health",
        "Amino Acids",
        "Minerals",
        "Sports Nutrition",
        "Antioxidants",
        "Herbs",
        "CBD",
        "Protein Powders & Shakes",
        "Calcium & Joint Health",
        "Plant Oils",
        "Superfoods & Greens",
        "Probiotics",
        "Heart Health",
        "Collagen",
        "OTC Internal",
        "Multivitamins",
        "Enzymes",
    ]),
    ("Seasonal & Special", &[
        "Featured",
        "Mother's Day",
        "Healthy Living",
        "ALDI Finds",
        "BBQ & Picnic",
        "Game Day",
        "Valentine's Day",
        "Easter",
        "Fall Products",
        "College & Dorm Room",
        "Grilling",
        "Floral",
        "Flowers & Plants",
        "Plants",
        "Bouquets",
    ]),
    ("Alcohol & Tobacco", &[
        "Beer, Wine & Spirits",
        "Tobacco",
        "Wine, Beer & Liquor",
    ]),
    ("Pet Supplies", &[
        "Pet Supplies",
        "Pet",
        "Pet Stuff",
    ]),
    ("Miscellaneous", &[
        "Unknown",
        "Products",
    ]),
];

/// Pure table lookup: the canonical category for a retailer label, or `None`
/// when the label is unmapped.
#[must_use]
pub fn lookup_category(raw: &str) -> Option<&'static str> {
    for (canonical, labels) in CATEGORY_TABLE {
        if labels.contains(&raw) {
            return Some(canonical);
        }
    }
    None
}

/// Maps a retailer category label onto the canonical taxonomy.
///
/// Unmapped labels fall back to `"Miscellaneous"` and emit a warning event
/// carrying the label, so new retailer aisles show up in the logs instead of
/// silently pooling in the fallback bucket.
#[must_use]
pub fn normalize_category(raw: &str) -> &'static str {
    lookup_category(raw).unwrap_or_else(|| {
        tracing::warn!(label = raw, "unmapped category label");
        "Miscellaneous"
    })
}
