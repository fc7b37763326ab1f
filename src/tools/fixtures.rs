//! 静态示例数据：用户账户、烹饪指南、门店列表
//!
//! 工具解析时直接返回这些固定数据，不访问任何外部系统。

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountInfo {
    pub user_id: &'static str,
    pub name: &'static str,
    pub phone: &'static str,
    pub email: &'static str,
    pub cooking_level: &'static str,
    pub dietary_restrictions: &'static [&'static str],
    pub favorite_cuisine: &'static str,
    pub kitchen_equipment: &'static [&'static str],
    pub last_cooking_session: &'static str,
    pub total_recipes_cooked: u32,
    pub preferences: CookingPreferences,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CookingPreferences {
    pub spice_level: &'static str,
    pub cooking_time: &'static str,
    pub servings: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct PolicyDoc {
    pub id: &'static str,
    pub name: &'static str,
    pub topic: &'static str,
    pub content: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct StoreLocation {
    pub name: &'static str,
    pub address: &'static str,
    pub zip_code: &'static str,
    pub phone: &'static str,
    pub hours: &'static str,
    pub specialties: &'static [&'static str],
}

pub const ACCOUNT_INFO: AccountInfo = AccountInfo {
    user_id: "COOK-123456",
    name: "Alex Johnson",
    phone: "+1-206-135-1246",
    email: "alex.johnson@email.com",
    cooking_level: "Intermediate",
    dietary_restrictions: &["None"],
    favorite_cuisine: "Italian",
    kitchen_equipment: &["Stand Mixer", "Food Processor", "Dutch Oven"],
    last_cooking_session: "2024-05-15",
    total_recipes_cooked: 45,
    preferences: CookingPreferences {
        spice_level: "Medium",
        cooking_time: "30-60 minutes",
        servings: "4-6 people",
    },
};

pub const POLICY_DOCS: &[PolicyDoc] = &[
    PolicyDoc {
        id: "COOK-001",
        name: "Basic Cooking Safety",
        topic: "cooking safety",
        content: "Always wash your hands before handling food. Keep raw meat separate from other ingredients. Use a food thermometer to ensure meats are cooked to safe temperatures. Never leave cooking food unattended on the stove.",
    },
    PolicyDoc {
        id: "COOK-002",
        name: "Knife Safety Guidelines",
        topic: "knife safety",
        content: "Always use a sharp knife - dull knives are more dangerous. Keep your fingers curled under when cutting. Use a cutting board that won't slip. Store knives in a knife block or sheath when not in use.",
    },
    PolicyDoc {
        id: "COOK-003",
        name: "Temperature Guidelines",
        topic: "cooking temperatures",
        content: "Chicken and turkey: 165°F (74°C). Ground beef: 160°F (71°C). Fish: 145°F (63°C). Pork: 145°F (63°C). Let meat rest for 3 minutes after cooking.",
    },
    PolicyDoc {
        id: "COOK-004",
        name: "Ingredient Substitution Guide",
        topic: "ingredient substitutions",
        content: "Butter: Use equal parts oil or margarine. Eggs: 1/4 cup applesauce or 1 tablespoon ground flaxseed + 3 tablespoons water per egg. Milk: Use almond, soy, or oat milk in equal amounts. Flour: 1 cup all-purpose = 1 cup whole wheat (may need more liquid).",
    },
    PolicyDoc {
        id: "COOK-005",
        name: "Cooking Techniques",
        topic: "cooking techniques",
        content: "Sauté: Cook quickly over high heat with small amount of oil. Simmer: Cook in liquid just below boiling point. Braise: Brown meat, then cook slowly in liquid. Roast: Cook uncovered in oven with dry heat. Steam: Cook food over boiling water.",
    },
];

pub const STORE_LOCATIONS: &[StoreLocation] = &[
    StoreLocation {
        name: "Fresh Market Grocery",
        address: "123 Main St, Seattle, WA",
        zip_code: "98101",
        phone: "(206) 555-0101",
        hours: "Mon-Sat 7am-10pm, Sun 8am-9pm",
        specialties: &["Organic produce", "Local meats", "Bulk spices"],
    },
    StoreLocation {
        name: "Kitchen Supply Co.",
        address: "456 Oak Ave, Seattle, WA",
        zip_code: "98102",
        phone: "(206) 555-0202",
        hours: "Mon-Fri 9am-6pm, Sat 10am-5pm, Sun Closed",
        specialties: &["Professional cookware", "Baking supplies", "Kitchen gadgets"],
    },
    StoreLocation {
        name: "Asian Market",
        address: "789 Pine St, Seattle, WA",
        zip_code: "98103",
        phone: "(206) 555-0303",
        hours: "Mon-Sun 9am-8pm",
        specialties: &["Asian ingredients", "Fresh seafood", "Rice varieties"],
    },
    StoreLocation {
        name: "Farmers Market",
        address: "321 Market Pl, Seattle, WA",
        zip_code: "98104",
        phone: "(206) 555-0404",
        hours: "Sat-Sun 8am-3pm",
        specialties: &["Local produce", "Artisan breads", "Fresh herbs"],
    },
    StoreLocation {
        name: "Bulk Food Store",
        address: "654 Grain St, Seattle, WA",
        zip_code: "98105",
        phone: "(206) 555-0505",
        hours: "Mon-Sat 8am-8pm, Sun 9am-6pm",
        specialties: &["Bulk ingredients", "Grains", "Nuts and seeds"],
    },
    StoreLocation {
        name: "Butcher Shop",
        address: "987 Meat Ave, Seattle, WA",
        zip_code: "98106",
        phone: "(206) 555-0606",
        hours: "Mon-Sat 8am-6pm, Sun Closed",
        specialties: &["Premium meats", "Custom cuts", "House-made sausages"],
    },
    StoreLocation {
        name: "Bakery Supply",
        address: "147 Flour St, Seattle, WA",
        zip_code: "98107",
        phone: "(206) 555-0707",
        hours: "Mon-Fri 7am-5pm, Sat 8am-4pm, Sun Closed",
        specialties: &["Baking ingredients", "Cake decorating", "Bread making supplies"],
    },
    StoreLocation {
        name: "Spice Merchant",
        address: "258 Spice Rd, Seattle, WA",
        zip_code: "98108",
        phone: "(206) 555-0808",
        hours: "Mon-Sat 10am-6pm, Sun 11am-5pm",
        specialties: &["Whole spices", "Seasoning blends", "Tea varieties"],
    },
    StoreLocation {
        name: "Cheese Shop",
        address: "369 Dairy Dr, Seattle, WA",
        zip_code: "98109",
        phone: "(206) 555-0909",
        hours: "Mon-Sat 10am-7pm, Sun 11am-6pm",
        specialties: &["Artisan cheeses", "Dairy products", "Wine pairings"],
    },
    StoreLocation {
        name: "Seafood Market",
        address: "741 Fish Way, Seattle, WA",
        zip_code: "98110",
        phone: "(206) 555-1010",
        hours: "Mon-Sat 8am-7pm, Sun 9am-5pm",
        specialties: &["Fresh seafood", "Shellfish", "Sushi-grade fish"],
    },
];

pub fn account_info() -> serde_json::Value {
    serde_json::to_value(&ACCOUNT_INFO).unwrap_or_default()
}

pub fn policy_docs() -> serde_json::Value {
    serde_json::to_value(POLICY_DOCS).unwrap_or_default()
}

pub fn store_locations() -> serde_json::Value {
    serde_json::to_value(STORE_LOCATIONS).unwrap_or_default()
}
