use std::collections::HashSet;
use std::path::Path;

const BLOOD_TYPES: [&str; 8] = ["O+", "O-", "A+", "A-", "B+", "B-", "AB+", "AB-"];
const MIN_PHONE_LENGTH: usize = 10;

fn main() {
    let seed_path = Path::new("seeds/sample_donors.json");
    validate_seed_file(seed_path);
    set_build_dependencies();
}

fn validate_seed_file(seed_path: &Path) {
    // Ensure the seed set exists at build time
    assert!(
        seed_path.exists(),
        "\n\nSEED BUILD ERROR: File not found\n\
         Path: {}\n\
         Please create the seed donor file before building.\n",
        seed_path.display()
    );

    let contents = std::fs::read_to_string(seed_path).unwrap_or_else(|e| {
        panic!(
            "\n\nSEED BUILD ERROR: Failed to read file\n\
             Path: {}\n\
             Error: {e}\n",
            seed_path.display()
        );
    });

    let seeds: serde_json::Value = serde_json::from_str(&contents).unwrap_or_else(|e| {
        panic!(
            "\n\nSEED BUILD ERROR: Invalid JSON\n\
             Path: {}\n\
             Error: {e}\n\
             Hint: Check for missing commas, brackets, or invalid syntax.\n",
            seed_path.display()
        );
    });

    let donors = seeds.as_array().unwrap_or_else(|| {
        panic!(
            "\n\nSEED BUILD ERROR: Root must be a JSON array of donors\n\
             Got: {seeds}\n"
        );
    });

    validate_donors(donors);

    println!("cargo:warning=Validated seed set: {} donors", donors.len());
}

fn validate_donors(donors: &[serde_json::Value]) {
    let mut seen_ids = HashSet::new();

    for (i, donor) in donors.iter().enumerate() {
        let id = donor
            .get("id")
            .and_then(serde_json::Value::as_u64)
            .unwrap_or_else(|| {
                panic!("\n\nSEED BUILD ERROR: Donor at index {i} missing numeric 'id' field\n")
            });

        assert!(
            seen_ids.insert(id),
            "\n\nSEED BUILD ERROR: Duplicate donor id {id} (index {i})\n"
        );

        validate_donor_fields(donor, id);
    }
}

fn validate_donor_fields(donor: &serde_json::Value, id: u64) {
    assert!(
        donor.get("name").and_then(|v| v.as_str()).is_some(),
        "\n\nSEED BUILD ERROR: Donor {id} missing 'name' field\n"
    );

    let blood_type = donor
        .get("bloodType")
        .and_then(|v| v.as_str())
        .unwrap_or("<missing>");
    assert!(
        BLOOD_TYPES.contains(&blood_type),
        "\n\nSEED BUILD ERROR: Donor {id} has invalid 'bloodType': {blood_type}\n"
    );

    let location = donor.get("location");
    let lat = location.and_then(|l| l.get("lat")).and_then(serde_json::Value::as_f64);
    let lon = location.and_then(|l| l.get("lon")).and_then(serde_json::Value::as_f64);
    assert!(
        lat.is_some() && lon.is_some(),
        "\n\nSEED BUILD ERROR: Donor {id} needs a 'location' with numeric 'lat' and 'lon'\n"
    );

    let phone = donor.get("phone").and_then(|v| v.as_str()).unwrap_or("");
    assert!(
        phone.chars().count() >= MIN_PHONE_LENGTH,
        "\n\nSEED BUILD ERROR: Donor {id} phone must be at least {MIN_PHONE_LENGTH} characters\n"
    );
}

fn set_build_dependencies() {
    // Tell cargo to rerun if the seed set changes
    println!("cargo:rerun-if-changed=seeds/sample_donors.json");

    // Tell cargo to rerun if build.rs changes
    println!("cargo:rerun-if-changed=build.rs");
}
