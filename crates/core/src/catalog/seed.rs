//! Hunts bundled with the app.

use crate::identifiers::HuntIdentifier;
use crate::models::{Clue, Difficulty, Hunt};

pub fn campus_hunts() -> Vec<Hunt> {
    vec![
        Hunt {
            id: HuntIdentifier::new("1"),
            title: "Historic Campus Walk".into(),
            description: "Embark on a journey through time as you discover the founding stories \
                          behind campus landmarks. Uncover hidden historical details along the way."
                .into(),
            difficulty: Difficulty::Medium,
            duration: 45,
            participants: 127,
            rating: 4.8,
            image: None,
            trending: true,
            clues: vec![
                Clue::new(
                    "Locate the inscription at the entrance of the Bloomberg Center and learn \
                     about its net-zero energy goal.",
                    40.741875,
                    -74.181570,
                ),
                Clue::new(
                    "Find 'The House' (the residential tower) and discover how it became the \
                     world's first passive house high-rise.",
                    40.742000,
                    -74.182000,
                ),
                Clue::new(
                    "Find the rooftop solar array on the Bloomberg Center and learn about the \
                     campus's sustainable energy model.",
                    40.742200,
                    -74.181800,
                ),
            ],
            educational_content: Some(
                "The Bloomberg Center was built with a net-zero energy goal, making it one of \
                 the city's first and largest net-zero buildings. Its net-zero features include \
                 a rooftop solar array, a geothermal heating and cooling system, and an \
                 all-electric design with no fossil fuels used on-site."
                    .into(),
            ),
            educational_link: Some(
                "https://www.google.com/search?q=Cornell+Tech+Bloomberg+Center".into(),
            ),
        },
        Hunt {
            id: HuntIdentifier::new("2"),
            title: "Science Building Quest".into(),
            description: "Explore cutting-edge research labs and discover innovations.".into(),
            difficulty: Difficulty::Easy,
            duration: 20,
            participants: 89,
            rating: 4.8,
            image: None,
            trending: true,
            clues: vec![Clue::new(
                "Find the molecular structure sculpture.",
                40.742500,
                -74.182500,
            )],
            educational_content: None,
            educational_link: None,
        },
        Hunt {
            id: HuntIdentifier::new("3"),
            title: "Library Mystery Hunt".into(),
            description: "Uncover hidden collections and rare manuscripts.".into(),
            difficulty: Difficulty::Hard,
            duration: 90,
            participants: 45,
            rating: 4.9,
            image: None,
            trending: true,
            clues: vec![],
            educational_content: None,
            educational_link: None,
        },
        Hunt {
            id: HuntIdentifier::new("4"),
            title: "Art Gallery Adventure".into(),
            description: "Discover masterpieces and learn about campus art history.".into(),
            difficulty: Difficulty::Easy,
            duration: 30,
            participants: 203,
            rating: 4.7,
            image: None,
            trending: false,
            clues: vec![],
            educational_content: None,
            educational_link: None,
        },
        Hunt {
            id: HuntIdentifier::new("5"),
            title: "Engineering Marvel Tour".into(),
            description: "Explore innovative projects and meet student inventors.".into(),
            difficulty: Difficulty::Medium,
            duration: 75,
            participants: 67,
            rating: 4.5,
            image: None,
            trending: false,
            clues: vec![],
            educational_content: None,
            educational_link: None,
        },
    ]
}
