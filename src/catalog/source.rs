//! Serializable catalog definition and the built-in default content
//!
//! A `CatalogSource` is what a TOML catalog file deserializes into. It is
//! compiled into a [`super::Catalog`] by `Catalog::from_source`, which builds
//! the tiered item tables and checks that every required table has entries.

use serde::{Deserialize, Serialize};

/// Quality adjective for a tiered item family, ordered common to rare
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quality {
    pub name: String,
    pub blurb: String,
}

/// Tiered item family: each quality forms one tier containing every form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TieredFamily {
    pub qualities: Vec<Quality>,
    pub forms: Vec<String>,
}

/// Plain (untiered) item definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlainItem {
    pub name: String,
    pub description: String,
}

/// Where an enemy template may be spawned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Habitat {
    Cave,
    Wilds,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttackDef {
    pub verbs: Vec<String>,
    pub limb: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyDef {
    pub name: String,
    pub damage: i32,
    pub health: i32,
    pub habitat: Habitat,
    pub attacks: Vec<AttackDef>,
}

/// Flavor vocabulary used by look descriptions and building names
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vocabulary {
    pub cave_descriptions: Vec<String>,

    pub grand_furniture: Vec<String>,
    pub grand_floors: Vec<String>,
    pub grand_walls: Vec<String>,
    pub humble_furniture: Vec<String>,
    pub humble_floors: Vec<String>,
    pub humble_walls: Vec<String>,

    pub tavern_adjectives: Vec<String>,
    pub tavern_nouns: Vec<String>,
    pub food_shop_nouns: Vec<String>,
    pub weapon_shop_nouns: Vec<String>,
    pub armour_shop_nouns: Vec<String>,
    pub home_nouns: Vec<String>,

    pub tavern_details: Vec<String>,
    pub food_details: Vec<String>,
    pub weapon_details: Vec<String>,
    pub armour_details: Vec<String>,
    pub home_details: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSource {
    pub weapons: TieredFamily,
    pub armour: TieredFamily,
    pub foods: Vec<PlainItem>,
    pub drinks: Vec<PlainItem>,
    pub forage: PlainItem,
    pub enemies: Vec<EnemyDef>,
    pub settlement_names: Vec<String>,
    pub person_names: Vec<String>,
    pub vocabulary: Vocabulary,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn qualities(items: &[(&str, &str)]) -> Vec<Quality> {
    items
        .iter()
        .map(|(name, blurb)| Quality {
            name: name.to_string(),
            blurb: blurb.to_string(),
        })
        .collect()
}

fn plain(items: &[(&str, &str)]) -> Vec<PlainItem> {
    items
        .iter()
        .map(|(name, description)| PlainItem {
            name: name.to_string(),
            description: description.to_string(),
        })
        .collect()
}

impl Default for CatalogSource {
    fn default() -> Self {
        Self {
            weapons: TieredFamily {
                qualities: qualities(&[
                    ("Broken", "pitiable if nothing else"),
                    ("Rusty", "tetanus might do the trick"),
                    ("Grimy", "in need of a good clean"),
                    ("Grim", "the more you look the worse it becomes"),
                    ("Flimsy", "just don't drop it"),
                    ("Inoffensive", "not likely to inspire much fear"),
                    ("Passable", "good enough to do the job"),
                    ("Pleasing", "rather nice-looking"),
                    ("Gleaming", "surprisingly well maintained"),
                    ("Refined", "a more sensible option"),
                    ("Sharp", "looking to do some serious business"),
                    ("Threatening", "more than just a suggestion"),
                    ("Terrifying", "the envy of your foes"),
                    ("Deadly", "the nightmare of all who disagree with you"),
                ]),
                forms: strings(&["Dagger", "Shortsword", "Longsword", "Axe", "Mace"]),
            },
            armour: TieredFamily {
                qualities: qualities(&[
                    ("Tattered", "more hole than garment"),
                    ("Patched", "mended more times than anyone can count"),
                    ("Serviceable", "it will turn a glancing blow"),
                    ("Sturdy", "built to take a beating"),
                    ("Reinforced", "riveted where it matters"),
                    ("Masterwork", "a smith's proudest work"),
                ]),
                forms: strings(&["Cap", "Gloves", "Boots", "Jerkin", "Shield"]),
            },
            foods: plain(&[
                ("Loaf of Bread", "a little stale around the edges"),
                ("Wheel of Cheese", "pungent enough to clear a room"),
                ("Salted Pork", "good for the road"),
                ("Red Apple", "crisp and sweet"),
                ("Bowl of Stew", "of uncertain but hearty origin"),
            ]),
            drinks: plain(&[
                ("Mug of Ale", "frothy and brown"),
                ("Flask of Mead", "honeyed and strong"),
                ("Jug of Cider", "sharp enough to pucker"),
                ("Bottle of Wine", "the label has long since peeled away"),
            ]),
            forage: PlainItem {
                name: "Cave Mushroom".into(),
                description: "a mushroom found amongst shadows and stone".into(),
            },
            enemies: vec![
                EnemyDef {
                    name: "Gremlin".into(),
                    damage: 30,
                    health: 80,
                    habitat: Habitat::Cave,
                    attacks: vec![AttackDef {
                        verbs: strings(&[
                            "slashes",
                            "moves to eviscerate",
                            "lunges at",
                            "scratches",
                            "brushes",
                        ]),
                        limb: "claws".into(),
                    }],
                },
                EnemyDef {
                    name: "Wolf".into(),
                    damage: 15,
                    health: 40,
                    habitat: Habitat::Wilds,
                    attacks: vec![AttackDef {
                        verbs: strings(&["bites", "snaps at", "tears at"]),
                        limb: "jaws".into(),
                    }],
                },
            ],
            settlement_names: strings(&[
                "Ashford",
                "Brackenmoor",
                "Cinderfall",
                "Dunmere",
                "Eastwatch",
                "Fallowby",
                "Gloamhollow",
                "Harrowgate",
                "Ironmoss",
                "Lowmarsh",
                "Mirewick",
                "Oldbarrow",
            ]),
            person_names: strings(&[
                "Agnes", "Bartholomew", "Cedric", "Dorcas", "Edmund", "Fenna", "Godric",
                "Hilda", "Ivo", "Joan", "Leofric", "Maud", "Osric", "Petronella", "Rowena",
                "Wat",
            ]),
            vocabulary: Vocabulary::default(),
        }
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            cave_descriptions: strings(&[
                "Water drips steadily from the jagged ceiling",
                "The walls glisten with a faint green slime",
                "A cold draught whistles through a narrow fissure",
                "Bones of some small creature litter the floor",
                "Roots push through cracks high overhead",
                "The air smells of damp earth and something fouler",
                "Strange scratches mark the stone at knee height",
            ]),
            grand_furniture: strings(&[
                "A polished oak table is set with silver candlesticks",
                "Velvet-backed chairs line the far wall",
                "A tall cabinet displays painted porcelain",
            ]),
            grand_floors: strings(&[
                "The floor is laid with chequered marble",
                "Thick woven rugs muffle your footsteps",
                "Waxed floorboards gleam in the lamplight",
            ]),
            grand_walls: strings(&[
                "Tapestries of hunting scenes hang from the walls",
                "The walls are panelled in dark carved wood",
                "Gilded frames hold portraits of stern ancestors",
            ]),
            humble_furniture: strings(&[
                "A rickety bench leans against a trestle table",
                "A straw pallet lies in one corner",
                "A few chipped stools surround a cold hearth",
            ]),
            humble_floors: strings(&[
                "The floor is bare packed earth",
                "Rushes are strewn across the floor",
                "Uneven boards creak beneath you",
            ]),
            humble_walls: strings(&[
                "The wattle walls are streaked with soot",
                "Daylight shows through gaps in the planking",
                "Bundles of dried herbs hang from the rafters",
            ]),
            tavern_adjectives: strings(&[
                "Drunken", "Prancing", "Gilded", "Rusty", "Sleeping", "Laughing",
            ]),
            tavern_nouns: strings(&["Pony", "Goose", "Tankard", "Dragon", "Fiddler", "Boar"]),
            food_shop_nouns: strings(&["Provisions", "Larder", "Pantry"]),
            weapon_shop_nouns: strings(&["Arms", "Forge", "Blades"]),
            armour_shop_nouns: strings(&["Armoury", "Mail and Plate", "Hides"]),
            home_nouns: strings(&["Cottage", "House", "Hovel"]),
            tavern_details: strings(&[
                "The air is thick with pipe smoke and spilled ale",
                "A bard tunes a battered lute by the fire",
            ]),
            food_details: strings(&[
                "Sacks of grain are stacked high against the counter",
                "Strings of onions dangle from the beams",
            ]),
            weapon_details: strings(&[
                "Racks of blades line every wall",
                "An anvil rings somewhere out back",
            ]),
            armour_details: strings(&[
                "Helms and mail shirts hang from iron hooks",
                "A half-finished breastplate sits on a stand",
            ]),
            home_details: strings(&[
                "A pot of something simmers over the fire",
                "A child's wooden toy lies forgotten on the floor",
            ]),
        }
    }
}
