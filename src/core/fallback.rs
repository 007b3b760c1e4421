use crate::models::{
    BodyType, Gender, HeightBucket, LocationProfile, OutfitRecommendation, RecommendationSet,
    RecommendationSource, SituationalContext, SkinTone, UserProfile,
};

/// Situation theme, classified from the prompt and any weather context.
///
/// Families are checked in a fixed priority order: explicit weather signals
/// beat occasion keywords, which beat season keywords; Versatile is the
/// default when nothing matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Monsoon,
    Winter,
    Summer,
    Formal,
    Party,
    Casual,
    Versatile,
}

const RAIN_KEYWORDS: &[&str] = &["rain", "raining", "rainy", "drizzle", "monsoon", "shower"];
const COLD_KEYWORDS: &[&str] = &["snow", "freezing", "chilly", "frost"];
const HEAT_KEYWORDS: &[&str] = &["heatwave", "scorching", "sweltering", "humid"];
const FORMAL_KEYWORDS: &[&str] = &["formal", "business", "office", "interview", "meeting"];
const PARTY_KEYWORDS: &[&str] = &["party", "event", "wedding", "celebration", "festive"];
const CASUAL_KEYWORDS: &[&str] = &["casual", "everyday", "weekend", "relaxed"];
const SUMMER_KEYWORDS: &[&str] = &["summer", "hot", "sunny"];
const WINTER_KEYWORDS: &[&str] = &["winter", "cold", "cool"];

/// Classify the situation described by the prompt and context
pub fn classify_theme(prompt: &str, context: Option<&SituationalContext>) -> Theme {
    let mut haystack = prompt.to_lowercase();
    let weather = context.and_then(|c| c.weather.as_ref());
    if let Some(w) = weather {
        haystack.push(' ');
        haystack.push_str(&w.condition.to_lowercase());
    }
    if let Some(climate) = context
        .and_then(|c| c.location.as_ref())
        .map(|l| l.climate.to_lowercase())
    {
        haystack.push(' ');
        haystack.push_str(&climate);
    }

    let contains_any = |keywords: &[&str]| keywords.iter().any(|k| haystack.contains(k));

    // Weather family first
    if contains_any(RAIN_KEYWORDS) {
        return Theme::Monsoon;
    }
    if contains_any(COLD_KEYWORDS) || weather.map_or(false, |w| w.temperature_c < 15.0) {
        return Theme::Winter;
    }
    if contains_any(HEAT_KEYWORDS) || weather.map_or(false, |w| w.temperature_c > 30.0) {
        return Theme::Summer;
    }

    // Occasion family
    if contains_any(FORMAL_KEYWORDS) {
        return Theme::Formal;
    }
    if contains_any(PARTY_KEYWORDS) {
        return Theme::Party;
    }
    if contains_any(CASUAL_KEYWORDS) {
        return Theme::Casual;
    }

    // Season family
    if contains_any(SUMMER_KEYWORDS) {
        return Theme::Summer;
    }
    if contains_any(WINTER_KEYWORDS) {
        return Theme::Winter;
    }

    Theme::Versatile
}

/// Pre-authored outfit template
#[derive(Debug, Clone, Copy)]
pub struct OutfitTemplate {
    pub style: &'static str,
    pub colors: &'static [&'static str],
    pub items: &'static [&'static str],
    pub accessories: &'static str,
    pub mood: &'static str,
    pub reasoning: &'static str,
}

// -- Gendered template tables. Male and female item vocabularies are
// -- disjoint; unknown gender uses the neutral set.

const MALE_FORMAL: [OutfitTemplate; 2] = [
    OutfitTemplate {
        style: "Sharp Business",
        colors: &["navy", "white", "brown"],
        items: &["navy blazer", "white dress shirt", "charcoal trousers", "brown oxford shoes"],
        accessories: "Leather strap watch and a slim belt matching the shoes",
        mood: "Composed and authoritative",
        reasoning: "A navy-and-white base reads polished in any office and the brown leather keeps it approachable.",
    },
    OutfitTemplate {
        style: "Smart Minimal",
        colors: &["charcoal", "light blue"],
        items: &["charcoal suit", "light blue shirt", "black derby shoes"],
        accessories: "Pocket square and a minimal tie",
        mood: "Clean and deliberate",
        reasoning: "Charcoal flatters under artificial light and a soft blue shirt keeps the look from feeling severe.",
    },
];

const FEMALE_FORMAL: [OutfitTemplate; 2] = [
    OutfitTemplate {
        style: "Boardroom Classic",
        colors: &["black", "ivory"],
        items: &["ivory blouse", "black pencil skirt", "tailored black blazer", "pointed flats"],
        accessories: "Stud earrings and a structured tote",
        mood: "Poised and confident",
        reasoning: "High-contrast ivory and black is unambiguous business wear and the tailored blazer sharpens the silhouette.",
    },
    OutfitTemplate {
        style: "Soft Power",
        colors: &["beige", "white", "gold"],
        items: &["beige wide-leg trousers", "white wrap top", "nude block heels"],
        accessories: "Thin gold chain and a leather watch",
        mood: "Warm yet professional",
        reasoning: "Tonal neutrals project calm seniority while the wrap top keeps the outfit comfortable through a long day.",
    },
];

const MALE_PARTY: [OutfitTemplate; 2] = [
    OutfitTemplate {
        style: "Evening Edge",
        colors: &["black", "maroon"],
        items: &["black slim shirt", "maroon chinos", "black chelsea boots"],
        accessories: "Bracelet and a subtle cologne",
        mood: "Bold and social",
        reasoning: "Dark saturated tones photograph well at night and the slim shirt holds its line on the dance floor.",
    },
    OutfitTemplate {
        style: "Festive Kurta",
        colors: &["deep green", "gold"],
        items: &["deep green silk kurta", "cream churidar", "tan mojaris"],
        accessories: "Metal-dial watch",
        mood: "Celebratory and rooted",
        reasoning: "A rich silk kurta carries festive occasions effortlessly and the gold accents catch evening light.",
    },
];

const FEMALE_PARTY: [OutfitTemplate; 2] = [
    OutfitTemplate {
        style: "Night Out",
        colors: &["black", "silver"],
        items: &["black slip dress", "silver heels", "cropped shrug"],
        accessories: "Statement earrings and a clutch",
        mood: "Glamorous and easy",
        reasoning: "A slip dress moves well and silver accents lift black from plain to evening-ready.",
    },
    OutfitTemplate {
        style: "Festive Lehenga",
        colors: &["teal", "gold"],
        items: &["teal lehenga", "embroidered blouse", "sheer dupatta", "gold sandals"],
        accessories: "Jhumkas and stacked bangles",
        mood: "Radiant and traditional",
        reasoning: "Teal with gold embroidery flatters under warm festival lighting and the dupatta adds movement.",
    },
];

const MALE_CASUAL: [OutfitTemplate; 2] = [
    OutfitTemplate {
        style: "Weekend Easy",
        colors: &["white", "blue"],
        items: &["white crew t-shirt", "blue slim jeans", "white sneakers"],
        accessories: "Canvas cap",
        mood: "Relaxed and fresh",
        reasoning: "A white tee over blue denim is the most dependable casual pairing there is; clean sneakers finish it.",
    },
    OutfitTemplate {
        style: "Layered Street",
        colors: &["olive", "black"],
        items: &["olive overshirt", "black t-shirt", "black joggers", "retro trainers"],
        accessories: "Crossbody sling",
        mood: "Street-smart",
        reasoning: "An olive overshirt adds structure without formality and keeps pockets practical for errands.",
    },
];

const FEMALE_CASUAL: [OutfitTemplate; 2] = [
    OutfitTemplate {
        style: "Everyday Breeze",
        colors: &["blush", "white"],
        items: &["blush oversized shirt", "white straight jeans", "white slip-on sneakers"],
        accessories: "Tote bag and hoop earrings",
        mood: "Effortless and light",
        reasoning: "Soft blush over white stays airy through a full day and the oversized cut moves with you.",
    },
    OutfitTemplate {
        style: "Kurti Comfort",
        colors: &["mustard", "navy"],
        items: &["mustard cotton kurti", "navy palazzos", "flat sandals"],
        accessories: "Cloth sling bag",
        mood: "Grounded and comfortable",
        reasoning: "Breathable cotton in warm mustard works from errands to coffee and the palazzos keep it easy.",
    },
];

const MALE_SUMMER: [OutfitTemplate; 2] = [
    OutfitTemplate {
        style: "Heat Beater",
        colors: &["light blue", "beige"],
        items: &["light blue linen shirt", "beige shorts", "espadrilles"],
        accessories: "Sunglasses and a woven belt",
        mood: "Cool and unhurried",
        reasoning: "Linen breathes in high heat and pale colors reflect sun instead of absorbing it.",
    },
    OutfitTemplate {
        style: "Summer City",
        colors: &["white", "khaki"],
        items: &["white half-sleeve shirt", "khaki chinos", "loafers without socks"],
        accessories: "Light canvas watch",
        mood: "Crisp and mobile",
        reasoning: "A breathable half-sleeve shirt stays presentable in the sun while chinos dress it up enough for the city.",
    },
];

const FEMALE_SUMMER: [OutfitTemplate; 2] = [
    OutfitTemplate {
        style: "Sun Dress",
        colors: &["yellow", "white"],
        items: &["yellow midi sundress", "white flat sandals"],
        accessories: "Straw hat and round sunglasses",
        mood: "Bright and carefree",
        reasoning: "A flowing sundress keeps air moving and yellow thrives in strong daylight.",
    },
    OutfitTemplate {
        style: "Breathe Easy",
        colors: &["white", "pastel green"],
        items: &["white cotton top", "pastel green culottes", "slide sandals"],
        accessories: "Canvas tote",
        mood: "Airy and calm",
        reasoning: "Loose cotton separates beat the heat without clinging, and pastels stay fresh-looking in humidity.",
    },
];

const MALE_WINTER: [OutfitTemplate; 2] = [
    OutfitTemplate {
        style: "City Layers",
        colors: &["charcoal", "burgundy"],
        items: &["burgundy sweater", "charcoal wool coat", "dark jeans", "leather boots"],
        accessories: "Wool scarf and gloves",
        mood: "Warm and put-together",
        reasoning: "A wool coat over a fine-knit sweater traps heat while keeping a clean line through the torso.",
    },
    OutfitTemplate {
        style: "Cold Snap",
        colors: &["navy", "grey"],
        items: &["navy puffer jacket", "grey hoodie", "thermal joggers", "high-top sneakers"],
        accessories: "Beanie",
        mood: "Practical and cozy",
        reasoning: "A puffer over a hoodie layers cheaply and effectively when the temperature really drops.",
    },
];

const FEMALE_WINTER: [OutfitTemplate; 2] = [
    OutfitTemplate {
        style: "Wrapped Up",
        colors: &["camel", "cream"],
        items: &["camel long coat", "cream turtleneck", "straight-leg trousers", "ankle boots"],
        accessories: "Knit scarf and leather gloves",
        mood: "Elegant and warm",
        reasoning: "Camel over cream is a classic cold-weather palette and the long coat keeps wind off the legs.",
    },
    OutfitTemplate {
        style: "Knit Comfort",
        colors: &["maroon", "black"],
        items: &["maroon sweater dress", "black tights", "knee-high boots"],
        accessories: "Beret and tote",
        mood: "Cozy and polished",
        reasoning: "A sweater dress with tights insulates surprisingly well while staying dressed-up enough for plans.",
    },
];

const MALE_MONSOON: [OutfitTemplate; 2] = [
    OutfitTemplate {
        style: "Rain Ready",
        colors: &["navy", "grey"],
        items: &["navy water-resistant jacket", "grey quick-dry t-shirt", "dark cropped trousers", "waterproof sneakers"],
        accessories: "Compact umbrella",
        mood: "Prepared and unbothered",
        reasoning: "Quick-dry fabrics and cropped hems keep rain from ruining the day, and dark colors hide splashes.",
    },
    OutfitTemplate {
        style: "Drizzle Layer",
        colors: &["black", "olive"],
        items: &["olive windcheater", "black t-shirt", "black slim jeans", "rubber-soled boots"],
        accessories: "Waterproof backpack",
        mood: "Functional and sharp",
        reasoning: "A windcheater shrugs off drizzle and rubber soles grip wet pavement.",
    },
];

const FEMALE_MONSOON: [OutfitTemplate; 2] = [
    OutfitTemplate {
        style: "Monsoon Light",
        colors: &["teal", "grey"],
        items: &["teal rain jacket", "grey quick-dry leggings", "ankle-length rain boots"],
        accessories: "Foldable umbrella and a zip pouch",
        mood: "Bright against grey skies",
        reasoning: "A pop of teal lifts overcast days and quick-dry layers shrug off sudden showers.",
    },
    OutfitTemplate {
        style: "Drizzle Dress",
        colors: &["navy", "white"],
        items: &["navy knee-length shift dress", "waterproof flats", "light shrug"],
        accessories: "Crossbody with rain cover",
        mood: "Practical grace",
        reasoning: "A knee-length hem stays clear of puddles and navy forgives water spots.",
    },
];

const MALE_VERSATILE: [OutfitTemplate; 2] = [
    OutfitTemplate {
        style: "Go Anywhere",
        colors: &["navy", "white", "tan"],
        items: &["navy polo", "white chinos", "tan loafers"],
        accessories: "Minimal watch",
        mood: "Adaptable and neat",
        reasoning: "A polo with chinos moves between lunch, errands and an unplanned dinner without a change.",
    },
    OutfitTemplate {
        style: "Smart Casual Default",
        colors: &["grey", "black"],
        items: &["grey oxford shirt", "black slim trousers", "white leather sneakers"],
        accessories: "Leather belt",
        mood: "Understated",
        reasoning: "Grey over black with clean sneakers is the safest outfit that still looks intentional.",
    },
];

const FEMALE_VERSATILE: [OutfitTemplate; 2] = [
    OutfitTemplate {
        style: "Anywhere Ease",
        colors: &["white", "denim blue"],
        items: &["white fitted shirt", "high-waist denim jeans", "ballet flats"],
        accessories: "Slim watch and small hoops",
        mood: "Classic and current",
        reasoning: "A crisp white shirt over good denim adapts to almost any plan with a change of accessories.",
    },
    OutfitTemplate {
        style: "Day-to-Night",
        colors: &["black", "rust"],
        items: &["black jumpsuit", "rust cardigan", "white sneakers"],
        accessories: "Layered necklaces",
        mood: "Flexible and modern",
        reasoning: "A jumpsuit is one decision that works all day; swap the sneakers for heels and it does evenings too.",
    },
];

const NEUTRAL_FORMAL: [OutfitTemplate; 2] = [
    OutfitTemplate {
        style: "Studio Formal",
        colors: &["black", "white"],
        items: &["white band-collar shirt", "black straight trousers", "black derbies"],
        accessories: "Minimal metal watch",
        mood: "Precise",
        reasoning: "A band-collar shirt reads formal without gendered tailoring and monochrome always lands.",
    },
    OutfitTemplate {
        style: "Soft Structure",
        colors: &["grey", "ivory"],
        items: &["ivory knit top", "grey relaxed blazer", "grey tapered trousers", "leather loafers"],
        accessories: "Tonal belt",
        mood: "Calm authority",
        reasoning: "Relaxed tailoring in close tones keeps the outfit professional and comfortable for long days.",
    },
];

const NEUTRAL_PARTY: [OutfitTemplate; 2] = [
    OutfitTemplate {
        style: "After Dark",
        colors: &["black", "emerald"],
        items: &["emerald satin shirt", "black tailored trousers", "polished boots"],
        accessories: "Single ring and a slim chain",
        mood: "Magnetic",
        reasoning: "Satin catches low light and emerald stands apart from a sea of black at any party.",
    },
    OutfitTemplate {
        style: "Celebration Layers",
        colors: &["gold", "navy"],
        items: &["navy brocade jacket", "plain black tee", "dark trousers", "metallic-accent shoes"],
        accessories: "Minimal bracelet",
        mood: "Festive",
        reasoning: "One statement brocade layer over basics delivers festive energy without overdressing.",
    },
];

const NEUTRAL_CASUAL: [OutfitTemplate; 2] = [
    OutfitTemplate {
        style: "Daily Uniform",
        colors: &["white", "blue"],
        items: &["white t-shirt", "blue relaxed jeans", "canvas sneakers"],
        accessories: "Fabric-strap watch",
        mood: "Easygoing",
        reasoning: "A plain tee with relaxed denim fits every casual plan and layers well if the day changes.",
    },
    OutfitTemplate {
        style: "Soft Layers",
        colors: &["beige", "brown"],
        items: &["beige hoodie", "brown cargo pants", "suede sneakers"],
        accessories: "Backpack",
        mood: "Comfortable",
        reasoning: "Earth tones pair themselves, which makes a hoodie-and-cargo outfit hard to get wrong.",
    },
];

const NEUTRAL_SUMMER: [OutfitTemplate; 2] = [
    OutfitTemplate {
        style: "Open Air",
        colors: &["white", "sky blue"],
        items: &["white linen shirt", "sky blue drawstring trousers", "slide sandals"],
        accessories: "Bucket hat",
        mood: "Unbothered by heat",
        reasoning: "Linen and loose drawstring cuts keep air moving when the temperature climbs.",
    },
    OutfitTemplate {
        style: "Shade Seeker",
        colors: &["pastel green", "cream"],
        items: &["pastel green oversized tee", "cream shorts", "breathable trainers"],
        accessories: "Sunglasses",
        mood: "Light",
        reasoning: "Pale, loose layers absorb the least heat and forgive a sweaty commute.",
    },
];

const NEUTRAL_WINTER: [OutfitTemplate; 2] = [
    OutfitTemplate {
        style: "Thermal Base",
        colors: &["charcoal", "cream"],
        items: &["cream thermal top", "charcoal fleece jacket", "dark straight trousers", "insulated boots"],
        accessories: "Knit beanie",
        mood: "Insulated",
        reasoning: "A thermal base under fleece beats one heavy layer and stays flexible indoors.",
    },
    OutfitTemplate {
        style: "Long Coat Armor",
        colors: &["black", "grey"],
        items: &["black long overcoat", "grey knit sweater", "black jeans", "leather boots"],
        accessories: "Thick scarf",
        mood: "Shielded and sleek",
        reasoning: "A long overcoat blocks wind from shoulder to knee, which matters more than any inner layer.",
    },
];

const NEUTRAL_MONSOON: [OutfitTemplate; 2] = [
    OutfitTemplate {
        style: "Splash Proof",
        colors: &["navy", "yellow"],
        items: &["yellow rain shell", "navy quick-dry t-shirt", "dark cropped joggers", "waterproof sneakers"],
        accessories: "Dry bag",
        mood: "Cheerfully prepared",
        reasoning: "A bright shell stands out in low visibility and cropped joggers stay out of puddles.",
    },
    OutfitTemplate {
        style: "Grey Sky Layers",
        colors: &["black", "grey"],
        items: &["black windcheater", "grey tee", "black track pants", "rubber-soled shoes"],
        accessories: "Compact umbrella",
        mood: "Low maintenance",
        reasoning: "Dark synthetics dry fast and hide water marks, which is all monsoon wear really needs.",
    },
];

const NEUTRAL_VERSATILE: [OutfitTemplate; 2] = [
    OutfitTemplate {
        style: "Capsule Core",
        colors: &["navy", "white", "grey"],
        items: &["navy overshirt", "white t-shirt", "grey tapered trousers", "white sneakers"],
        accessories: "Simple watch",
        mood: "Quietly ready",
        reasoning: "An overshirt over a tee scales up or down with one layer, which covers most days.",
    },
    OutfitTemplate {
        style: "Monochrome Base",
        colors: &["black", "charcoal"],
        items: &["black crew sweatshirt", "charcoal joggers", "black minimal sneakers"],
        accessories: "Canvas tote",
        mood: "Streamlined",
        reasoning: "All-dark basics always read deliberate and pair with any jacket you add later.",
    },
];

// -- Regional tables, used when location context is present. Composed of
// -- gender-neutral garments only.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RegionFamily {
    Coastal,
    Mountain,
    Desert,
    Metro,
    Plains,
}

const COASTAL_TEMPLATES: [OutfitTemplate; 2] = [
    OutfitTemplate {
        style: "Shoreline Linen",
        colors: &["white", "aqua"],
        items: &["white linen shirt", "aqua drawstring trousers", "rope sandals"],
        accessories: "Woven bracelet",
        mood: "Sea-breeze relaxed",
        reasoning: "Linen dries fast in salt air and pale shades mirror the coastline light.",
    },
    OutfitTemplate {
        style: "Harbor Evening",
        colors: &["navy", "cream"],
        items: &["cream knit tee", "navy light jacket", "relaxed chinos", "canvas slip-ons"],
        accessories: "Light scarf for the wind",
        mood: "Easy and breezy",
        reasoning: "Evenings by the water turn windy, so one light layer earns its place.",
    },
];

const MOUNTAIN_TEMPLATES: [OutfitTemplate; 2] = [
    OutfitTemplate {
        style: "Trail Layers",
        colors: &["forest green", "grey"],
        items: &["forest green fleece", "grey base layer", "trek trousers", "grip-sole boots"],
        accessories: "Knit cap",
        mood: "Ready for altitude",
        reasoning: "Mountain weather swings fast, so a fleece over a wicking base adapts on the move.",
    },
    OutfitTemplate {
        style: "Hill Station",
        colors: &["maroon", "charcoal"],
        items: &["maroon wool sweater", "charcoal jeans", "ankle boots", "light down vest"],
        accessories: "Wool scarf",
        mood: "Snug",
        reasoning: "Wool holds warmth even slightly damp, which matters in hill mist.",
    },
];

const DESERT_TEMPLATES: [OutfitTemplate; 2] = [
    OutfitTemplate {
        style: "Dune Cover",
        colors: &["sand", "white"],
        items: &["loose white cotton shirt", "sand-colored loose trousers", "closed breathable shoes"],
        accessories: "Light head scarf",
        mood: "Shaded and cool",
        reasoning: "Full-coverage loose cotton beats exposed skin in dry heat and keeps dust off.",
    },
    OutfitTemplate {
        style: "Desert Night",
        colors: &["rust", "beige"],
        items: &["rust overshirt", "beige tee", "cotton cargo trousers", "desert boots"],
        accessories: "Compact water bottle sling",
        mood: "Warm after sundown",
        reasoning: "Desert evenings drop sharply, so a warm overshirt belongs in the plan.",
    },
];

const METRO_TEMPLATES: [OutfitTemplate; 2] = [
    OutfitTemplate {
        style: "City Commute",
        colors: &["black", "white"],
        items: &["black bomber jacket", "white tee", "dark slim jeans", "cushioned sneakers"],
        accessories: "Crossbody bag",
        mood: "Fast-moving",
        reasoning: "A bomber over basics survives transit, weather shifts and long walking days.",
    },
    OutfitTemplate {
        style: "Gallery Hop",
        colors: &["olive", "cream"],
        items: &["olive chore jacket", "cream knit top", "straight trousers", "leather sneakers"],
        accessories: "Tote bag",
        mood: "Understated urban",
        reasoning: "A chore jacket dresses casual basics up to city-venue level without trying hard.",
    },
];

const PLAINS_TEMPLATES: [OutfitTemplate; 2] = [
    OutfitTemplate {
        style: "Open Country",
        colors: &["khaki", "white"],
        items: &["white breathable shirt", "khaki straight trousers", "walking shoes"],
        accessories: "Wide-brim hat",
        mood: "Unhurried",
        reasoning: "Breathable basics with sun cover handle long open-air days comfortably.",
    },
    OutfitTemplate {
        style: "Field Layers",
        colors: &["brown", "beige"],
        items: &["beige overshirt", "brown tee", "durable trousers", "low boots"],
        accessories: "Canvas satchel",
        mood: "Practical",
        reasoning: "Earth tones hide dust and a hardy overshirt handles wind or sun alike.",
    },
];

fn region_family(location: &LocationProfile) -> RegionFamily {
    let haystack = format!(
        "{} {} {}",
        location.region.to_lowercase(),
        location.terrain.to_lowercase(),
        location.climate.to_lowercase()
    );

    let contains_any =
        |keywords: &[&str]| keywords.iter().any(|k| haystack.contains(k));

    if contains_any(&["coast", "beach", "island", "seaside"]) {
        RegionFamily::Coastal
    } else if contains_any(&["mountain", "hill", "alpine", "highland"]) {
        RegionFamily::Mountain
    } else if contains_any(&["desert", "arid", "dune"]) {
        RegionFamily::Desert
    } else if contains_any(&["metro", "urban", "city"]) {
        RegionFamily::Metro
    } else {
        RegionFamily::Plains
    }
}

fn regional_templates(family: RegionFamily) -> &'static [OutfitTemplate; 2] {
    match family {
        RegionFamily::Coastal => &COASTAL_TEMPLATES,
        RegionFamily::Mountain => &MOUNTAIN_TEMPLATES,
        RegionFamily::Desert => &DESERT_TEMPLATES,
        RegionFamily::Metro => &METRO_TEMPLATES,
        RegionFamily::Plains => &PLAINS_TEMPLATES,
    }
}

fn themed_templates(theme: Theme, gender: Gender) -> &'static [OutfitTemplate; 2] {
    match (theme, gender) {
        (Theme::Formal, Gender::Male) => &MALE_FORMAL,
        (Theme::Formal, Gender::Female) => &FEMALE_FORMAL,
        (Theme::Formal, Gender::Unknown) => &NEUTRAL_FORMAL,
        (Theme::Party, Gender::Male) => &MALE_PARTY,
        (Theme::Party, Gender::Female) => &FEMALE_PARTY,
        (Theme::Party, Gender::Unknown) => &NEUTRAL_PARTY,
        (Theme::Casual, Gender::Male) => &MALE_CASUAL,
        (Theme::Casual, Gender::Female) => &FEMALE_CASUAL,
        (Theme::Casual, Gender::Unknown) => &NEUTRAL_CASUAL,
        (Theme::Summer, Gender::Male) => &MALE_SUMMER,
        (Theme::Summer, Gender::Female) => &FEMALE_SUMMER,
        (Theme::Summer, Gender::Unknown) => &NEUTRAL_SUMMER,
        (Theme::Winter, Gender::Male) => &MALE_WINTER,
        (Theme::Winter, Gender::Female) => &FEMALE_WINTER,
        (Theme::Winter, Gender::Unknown) => &NEUTRAL_WINTER,
        (Theme::Monsoon, Gender::Male) => &MALE_MONSOON,
        (Theme::Monsoon, Gender::Female) => &FEMALE_MONSOON,
        (Theme::Monsoon, Gender::Unknown) => &NEUTRAL_MONSOON,
        (Theme::Versatile, Gender::Male) => &MALE_VERSATILE,
        (Theme::Versatile, Gender::Female) => &FEMALE_VERSATILE,
        (Theme::Versatile, Gender::Unknown) => &NEUTRAL_VERSATILE,
    }
}

fn body_type_clause(body_type: BodyType) -> Option<&'static str> {
    match body_type {
        BodyType::Slim => Some("Layered pieces add welcome structure to a slim frame."),
        BodyType::Athletic => {
            Some("Fitted cuts follow an athletic build without pinching the shoulders.")
        }
        BodyType::Heavy => Some("Darker, vertical-leaning pieces streamline a heavier build."),
        BodyType::Hourglass => Some("A defined waistline keeps an hourglass figure in proportion."),
        BodyType::Pear => Some("Structure at the shoulders balances a pear silhouette."),
        BodyType::Apple => Some("Longer, flowing layers skim an apple silhouette comfortably."),
        BodyType::Rectangle => Some("Belted or layered pieces add shape to a rectangle frame."),
        BodyType::Unspecified => None,
    }
}

fn height_clause(height_cm: u16) -> Option<&'static str> {
    if height_cm < 160 {
        Some("Higher waistlines and cropped hems lengthen a petite frame.")
    } else if height_cm > 175 {
        Some("Your height carries longer layers and bolder proportions easily.")
    } else {
        None
    }
}

fn skin_tone_clause(skin_tone: SkinTone) -> Option<&'static str> {
    match skin_tone {
        SkinTone::Fair => Some("Cooler shades and pastels complement fair skin."),
        SkinTone::Wheatish => Some("Earthy tones and warm neutrals flatter wheatish skin."),
        SkinTone::Dusky => Some("Rich jewel tones stand out beautifully on dusky skin."),
        SkinTone::Dark => Some("Bright saturated colors and crisp whites pop against dark skin."),
        SkinTone::Unspecified => None,
    }
}

fn location_sentence(location: &LocationProfile) -> String {
    let trend = location
        .local_trends
        .first()
        .map(|t| format!(", with {} trending locally", t))
        .unwrap_or_default();
    format!(
        "In {}, the {} climate and {} terrain suit {} styling{}.",
        location.place, location.climate, location.terrain, location.cultural_style, trend
    )
}

/// Append profile-derived clauses to a template's base reasoning
fn enrich_reasoning(
    base: &str,
    profile: &UserProfile,
    location: Option<&LocationProfile>,
) -> String {
    let mut reasoning = String::from(base);
    for clause in [
        body_type_clause(profile.body_type),
        height_clause(profile.height_cm),
        skin_tone_clause(profile.skin_tone),
    ]
    .into_iter()
    .flatten()
    {
        reasoning.push(' ');
        reasoning.push_str(clause);
    }
    if let Some(loc) = location {
        reasoning.push(' ');
        reasoning.push_str(&location_sentence(loc));
    }
    reasoning
}

const BASELINE_TIPS: [&str; 4] = [
    "Fit comes first: tailor anything that hangs loose at the shoulders or waist.",
    "Limit an outfit to three main colors to keep it cohesive.",
    "Keep footwear clean and in good repair; it anchors every look.",
    "One light layer adds depth to even the simplest outfit.",
];

/// Baseline tips plus up to two conditioned on the profile (4 to 6 total)
pub fn styling_tips(profile: &UserProfile) -> Vec<String> {
    let mut tips: Vec<String> = BASELINE_TIPS.iter().map(|t| t.to_string()).collect();

    let body_tip = match profile.body_type {
        BodyType::Heavy => {
            Some("Monochrome outfits create a continuous line that slims the silhouette.")
        }
        BodyType::Slim => Some("Textured fabrics like knits and corduroy add visual weight."),
        BodyType::Pear | BodyType::Hourglass => {
            Some("Balance volume: keep one half of the outfit fitted.")
        }
        _ => None,
    };
    let height_tip = match HeightBucket::from_cm(profile.height_cm) {
        HeightBucket::Short => {
            Some("Keep proportions high: tuck tops in and favor ankle-length hems.")
        }
        HeightBucket::Tall => Some("Break up a tall frame with a contrast layer at the waist."),
        HeightBucket::Average => None,
    };
    let tone_tip = match profile.skin_tone {
        SkinTone::Unspecified => None,
        _ => Some("Keep colors that echo your best palette closest to your face."),
    };

    tips.extend(
        [body_tip, height_tip, tone_tip]
            .into_iter()
            .flatten()
            .take(2)
            .map(|t| t.to_string()),
    );

    tips.truncate(6);
    tips
}

/// Union of outfit colors in first-appearance order, capped at four
pub fn palette_union(outfits: &[OutfitRecommendation]) -> Vec<String> {
    let mut palette: Vec<String> = Vec::new();
    for outfit in outfits {
        for color in &outfit.colors {
            if palette.len() == 4 {
                return palette;
            }
            if !palette.iter().any(|c| c.eq_ignore_ascii_case(color)) {
                palette.push(color.clone());
            }
        }
    }
    palette
}

/// Deterministic recommendation generation; never fails.
///
/// Used whenever the AI path is unavailable or unparsable. Shopping links
/// are attached afterwards by the caller.
pub fn generate(
    prompt: &str,
    profile: &UserProfile,
    context: Option<&SituationalContext>,
) -> RecommendationSet {
    let location = context.and_then(|c| c.location.as_ref());

    let templates = match location {
        Some(loc) => regional_templates(region_family(loc)),
        None => themed_templates(classify_theme(prompt, context), profile.gender),
    };

    let outfits: Vec<OutfitRecommendation> = templates
        .iter()
        .map(|t| OutfitRecommendation {
            style: t.style.to_string(),
            colors: t.colors.iter().map(|c| c.to_string()).collect(),
            items: t.items.iter().map(|i| i.to_string()).collect(),
            accessories: t.accessories.to_string(),
            mood: t.mood.to_string(),
            reasoning: enrich_reasoning(t.reasoning, profile, location),
            links: Vec::new(),
        })
        .collect();

    let palette = palette_union(&outfits);
    let styling_tips = styling_tips(profile);

    RecommendationSet {
        request_id: uuid::Uuid::new_v4(),
        source: RecommendationSource::RuleBased,
        outfits,
        palette,
        styling_tips,
        generated_at: chrono::Utc::now(),
    }
}
