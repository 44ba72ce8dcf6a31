//! Writes a tiny but complete dataset sample to disk.
use image::{GrayImage, ImageBuffer, Luma, Rgb, RgbImage};
use serde_json::json;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use vistas_toolkit::panoptic::encode_panoptic_id;

pub const IMAGE_ID: &str = "synthetic0001";
pub const WIDTH: u32 = 6;
pub const HEIGHT: u32 = 4;

pub const ROAD: u8 = 0;
pub const CAR: u8 = 1;
pub const SKY: u8 = 2;

pub const COLORS: [[u8; 3]; 3] = [[128, 64, 128], [0, 0, 142], [70, 130, 180]];

/// Label index per pixel: sky on top, two cars on the road.
pub const LABELS: [[u8; 6]; 4] = [
    [SKY, SKY, SKY, SKY, SKY, SKY],
    [ROAD, CAR, CAR, ROAD, CAR, ROAD],
    [ROAD, CAR, CAR, ROAD, CAR, ROAD],
    [ROAD, ROAD, ROAD, ROAD, ROAD, ROAD],
];

/// Instance id per pixel (only cars have instances).
pub const INSTANCES: [[u8; 6]; 4] = [
    [0, 0, 0, 0, 0, 0],
    [0, 1, 1, 0, 2, 0],
    [0, 1, 1, 0, 2, 0],
    [0, 0, 0, 0, 0, 0],
];

pub const ROAD_SEGMENT: u32 = 1000;
pub const SKY_SEGMENT: u32 = 2000;
pub const CAR_SEGMENTS: [u32; 2] = [70_001, 70_002];

/// Panoptic id per pixel; the bottom-right road pixel is void.
pub fn panoptic_ids() -> [[u32; 6]; 4] {
    let mut ids = [[0u32; 6]; 4];
    for y in 0..4 {
        for x in 0..6 {
            ids[y][x] = match (LABELS[y][x], INSTANCES[y][x]) {
                (SKY, _) => SKY_SEGMENT,
                (CAR, i) => CAR_SEGMENTS[usize::from(i) - 1],
                _ => ROAD_SEGMENT,
            };
        }
    }
    ids[3][5] = 0;
    ids
}

/// Panoptic segment id → category id.
fn category_of(id: u32) -> u32 {
    match id {
        ROAD_SEGMENT => 13,
        SKY_SEGMENT => 27,
        _ => 55,
    }
}

pub fn label_config_json() -> serde_json::Value {
    json!({
        "version": "synthetic",
        "labels": [
            {"name": "construction--flat--road", "readable": "Road", "color": COLORS[0], "instances": false},
            {"name": "object--vehicle--car", "readable": "Car", "color": COLORS[1], "instances": true},
            {"name": "nature--sky", "readable": "Sky", "color": COLORS[2], "instances": false}
        ]
    })
}

/// Segments exactly matching `panoptic_ids()`, plus `extra` appended.
pub fn panoptic_json(extra: &[serde_json::Value]) -> serde_json::Value {
    let mut area: BTreeMap<u32, u64> = BTreeMap::new();
    let mut bbox: BTreeMap<u32, (u32, u32, u32, u32)> = BTreeMap::new();
    for (y, row) in panoptic_ids().iter().enumerate() {
        for (x, &id) in row.iter().enumerate() {
            if id == 0 {
                continue;
            }
            let (x, y) = (x as u32, y as u32);
            *area.entry(id).or_default() += 1;
            let b = bbox.entry(id).or_insert((x, y, x, y));
            *b = (b.0.min(x), b.1.min(y), b.2.max(x), b.3.max(y));
        }
    }
    let mut segments: Vec<serde_json::Value> = area
        .iter()
        .map(|(&id, &a)| {
            let (x0, y0, x1, y1) = bbox[&id];
            json!({
                "id": id,
                "category_id": category_of(id),
                "area": a,
                "bbox": [x0, y0, x1 - x0 + 1, y1 - y0 + 1],
                "iscrowd": 0
            })
        })
        .collect();
    segments.extend_from_slice(extra);

    json!({
        "annotations": [
            {"image_id": IMAGE_ID, "file_name": format!("{IMAGE_ID}.png"), "segments_info": segments},
            {"image_id": "other", "segments_info": []}
        ],
        "categories": [
            {"id": 13, "name": "Road", "supercategory": "construction--flat--road", "isthing": 0},
            {"id": 27, "name": "Sky", "supercategory": "nature--sky", "isthing": 0},
            {"id": 55, "name": "Car", "supercategory": "object--vehicle--car", "isthing": 1}
        ]
    })
}

/// Write `config.json` and `training/*` for [`IMAGE_ID`] under `root`.
pub fn write_dataset(root: &Path, panoptic: &serde_json::Value) {
    let split = root.join("training");
    for dir in ["images", "labels", "instances", "panoptic"] {
        fs::create_dir_all(split.join(dir)).unwrap();
    }
    fs::write(
        root.join("config.json"),
        serde_json::to_string_pretty(&label_config_json()).unwrap(),
    )
    .unwrap();

    RgbImage::from_fn(WIDTH, HEIGHT, |x, y| {
        Rgb(COLORS[usize::from(LABELS[y as usize][x as usize])])
    })
    .save(split.join(format!("images/{IMAGE_ID}.jpg")))
    .unwrap();

    GrayImage::from_fn(WIDTH, HEIGHT, |x, y| Luma([LABELS[y as usize][x as usize]]))
        .save(split.join(format!("labels/{IMAGE_ID}.png")))
        .unwrap();

    let packed: Vec<u16> = (0..HEIGHT as usize)
        .flat_map(|y| {
            (0..WIDTH as usize)
                .map(move |x| u16::from(LABELS[y][x]) * 256 + u16::from(INSTANCES[y][x]))
        })
        .collect();
    let instances: ImageBuffer<Luma<u16>, Vec<u16>> =
        ImageBuffer::from_raw(WIDTH, HEIGHT, packed).unwrap();
    instances
        .save(split.join(format!("instances/{IMAGE_ID}.png")))
        .unwrap();

    let ids = panoptic_ids();
    RgbImage::from_fn(WIDTH, HEIGHT, |x, y| {
        Rgb(encode_panoptic_id(ids[y as usize][x as usize]).unwrap())
    })
    .save(split.join(format!("panoptic/{IMAGE_ID}.png")))
    .unwrap();

    fs::write(
        split.join("panoptic/panoptic_2018.json"),
        serde_json::to_string(panoptic).unwrap(),
    )
    .unwrap();
}
