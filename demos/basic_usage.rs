use std::fs;

use ies_rescale::*;

fn main() {
    // Set up file paths
    let input_file = "downlight.ies";
    let ies_path = format!("./ies_files/{}", input_file);

    if !std::path::Path::new(&ies_path).exists() {
        println!(
            "IES file '{}' not found. Please ensure it exists in ./ies_files/",
            input_file
        );
        return;
    }

    println!("Parsing IES file: {}", input_file);

    let profile = match PhotometricProfile::from_path(&ies_path) {
        Ok(profile) => profile,
        Err(e) => {
            eprintln!("Failed to parse {}: {} ({})", input_file, e, e.suggested_action());
            return;
        },
    };

    println!("Parsed successfully!");
    println!("Format: {}", profile.file.format);
    println!(
        "Angles: {} vertical x {} horizontal",
        profile.photo.num_vert_angles, profile.photo.num_horz_angles
    );
    if let Some(manufacturer) = profile.keyword("MANUFAC") {
        println!("Manufacturer: {}", manufacturer);
    }

    if let Err(e) = profile.quick_validate() {
        println!("Validation warning: {}", e);
    }

    fs::create_dir_all("./generated").unwrap_or_else(|e| {
        eprintln!("Warning: Could not create generated directory: {}", e);
    });

    // 1. Export the profile to JSON
    if let Ok(json_data) = serde_json::to_string_pretty(&profile) {
        let json_path = format!("./generated/{}.json", input_file);
        if let Err(e) = fs::write(&json_path, json_data) {
            eprintln!("Warning: Could not write JSON file: {}", e);
        } else {
            println!("Profile exported to: {}", json_path);
        }
    }

    // 2. Rescale into narrower cones, both ways
    for (cone, mode) in [
        (90.0, RescaleMode::PreserveShape),
        (90.0, RescaleMode::PreserveIntensity),
        (30.0, RescaleMode::PreserveShape),
    ] {
        let scaled = match profile.rescale(cone, mode) {
            Ok(scaled) => scaled,
            Err(e) => {
                eprintln!("Warning: Could not rescale to {} degrees: {}", cone, e);
                continue;
            },
        };

        let out_path = format!("./generated/{}_{:?}_{}", cone, mode, input_file);
        match scaled.write_to_path(&out_path) {
            Ok(()) => println!(
                "Rescaled to {} degrees ({:?}), peak {} cd: {}",
                cone,
                mode,
                scaled.photo.max_candela(),
                out_path
            ),
            Err(e) => eprintln!("Warning: Could not write rescaled file: {}", e),
        }
    }
}
