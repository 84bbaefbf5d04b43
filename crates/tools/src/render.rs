//! Text and JSON views of a generated map.

use dungeon_core::{DoorConfiguration, GeneratedMap, GridCoord, RoomType};
use serde::Serialize;

fn glyph(room_type: RoomType) -> char {
    match room_type {
        RoomType::Start => 'S',
        RoomType::Normal => '#',
        RoomType::Boss => 'B',
        RoomType::Item => 'I',
        RoomType::Empty => 'E',
    }
}

/// North is up. Doors show as `-` and `|` between rooms.
pub fn ascii_map(map: &GeneratedMap) -> String {
    let coords = map.graph.coords();
    let (Some(min_x), Some(max_x), Some(min_y), Some(max_y)) = (
        coords.iter().map(|coord| coord.x).min(),
        coords.iter().map(|coord| coord.x).max(),
        coords.iter().map(|coord| coord.y).min(),
        coords.iter().map(|coord| coord.y).max(),
    ) else {
        return String::new();
    };

    let door = |coord: GridCoord| map.doors.get(&coord).copied().unwrap_or_default();
    let mut out = String::new();
    for y in (min_y..=max_y).rev() {
        let mut rooms = String::new();
        let mut links = String::new();
        for x in min_x..=max_x {
            let coord = GridCoord::new(x, y);
            let doors = door(coord);
            rooms.push(map.graph.get(coord).map_or(' ', glyph));
            rooms.push(if doors.east { '-' } else { ' ' });
            links.push(if doors.south { '|' } else { ' ' });
            links.push(' ');
        }
        out.push_str(rooms.trim_end());
        out.push('\n');
        if y > min_y {
            out.push_str(links.trim_end());
            out.push('\n');
        }
    }
    out
}

#[derive(Serialize)]
pub struct RoomSummary {
    pub x: i32,
    pub y: i32,
    pub room_type: RoomType,
    pub doors: DoorConfiguration,
}

#[derive(Serialize)]
pub struct MapSummary {
    pub seed: u64,
    pub room_count: usize,
    pub shortfall: bool,
    pub rooms: Vec<RoomSummary>,
}

impl MapSummary {
    pub fn of(map: &GeneratedMap) -> Self {
        Self {
            seed: map.seed,
            room_count: map.graph.len(),
            shortfall: map.shortfall.is_some(),
            rooms: map
                .graph
                .iter()
                .map(|(coord, room_type)| RoomSummary {
                    x: coord.x,
                    y: coord.y,
                    room_type,
                    doors: map.doors.get(&coord).copied().unwrap_or_default(),
                })
                .collect(),
        }
    }
}
