use serde::Serialize;

#[derive(Debug, PartialEq, Serialize)]
pub struct Park {
    pub name: &'static str,
    pub state: &'static str,
    pub annual_visitors: u64,
    /// Square miles.
    pub size: u32,
    pub attractions: &'static [Attraction],
    pub trails: &'static [Trail],
}

#[derive(Debug, PartialEq, Serialize)]
pub struct Attraction {
    pub name: &'static str,
    pub kind: &'static str,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct Trail {
    pub name: &'static str,
    /// Miles.
    pub length: f64,
    #[serde(rename = "loop")]
    pub is_loop: bool,
}

const fn attraction(name: &'static str, kind: &'static str) -> Attraction {
    Attraction { name, kind }
}

const fn trail(name: &'static str, length: f64, is_loop: bool) -> Trail {
    Trail {
        name,
        length,
        is_loop,
    }
}

pub static NATIONAL_PARKS: &[Park] = &[
    Park {
        name: "Yellowstone",
        state: "WY",
        annual_visitors: 4116528,
        size: 8991,
        attractions: &[
            attraction("Old Faithful", "geyser"),
            attraction("Grand Canyon of the Yellowstone", "canyon"),
            attraction("Tower Fall", "waterfall"),
            attraction("Yellowstone Lake", "lake"),
            attraction("Mammoth Hot Springs", "hot springs"),
        ],
        trails: &[
            trail("Uncle Tom's Trail", 0.1, false),
            trail("Trout Lake Trail", 1.4, true),
            trail("Storm Point Trail", 3.3, true),
        ],
    },
    Park {
        name: "Yosemite",
        state: "CA",
        annual_visitors: 4336890,
        size: 3027,
        attractions: &[
            attraction("El Capitan", "monolith"),
            attraction("Half Dome", "granite dome"),
            attraction("Vernal Fall", "waterfall"),
            attraction("Yosemite Falls", "waterfall"),
            attraction("Tuolomne Meadows", "meadow"),
            attraction("Tunnel View", "lookout point"),
            attraction("Cathedral Peak", "mountain"),
        ],
        trails: &[
            trail("Mist Trail", 11.0, false),
            trail("Yosemite Falls Trail", 11.6, false),
            trail("Panorama Trail", 13.5, false),
            trail("Clouds Rest", 23.3, false),
        ],
    },
    Park {
        name: "Grand Teton",
        state: "WY",
        annual_visitors: 3270076,
        size: 130,
        attractions: &[
            attraction("Grand Teton", "mountain"),
            attraction("Jenny Lake", "lake"),
            attraction("Inspiration Point", "lookout point"),
            attraction("Jackson Lake", "lake"),
            attraction("Snake River", "river"),
        ],
        trails: &[
            trail("String Lake Loop", 6.1, true),
            trail("Cascade Canyon", 16.1, false),
            trail("Static Peak Divide", 26.2, false),
        ],
    },
];

pub fn park_names() -> Vec<&'static str> {
    NATIONAL_PARKS.iter().map(|park| park.name).collect()
}

pub fn find_park(name: &str) -> Option<&'static Park> {
    NATIONAL_PARKS.iter().find(|park| park.name == name)
}
