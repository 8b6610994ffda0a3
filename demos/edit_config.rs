//! Reading, editing and writing back an INI-style unit file.
//!
//! Run with: cargo run --example edit_config

use std::error::Error;
use unitfile::{Document, OptionLine, Placement, Section};

const SERVICE: &str = "\
# Managed by provisioning
[Unit]
Description=Example daemon
After=network.target

[Service]
Type=simple
ExecStart=/usr/bin/example \\
    --config /etc/example.conf \\
    --verbose
Environment=LANG=C
Environment=TZ=UTC
";

fn main() -> Result<(), Box<dyn Error>> {
    let mut unit = unitfile::from_str(SERVICE);

    // Continued lines are joined, repeated options merged
    let service = unit.get(Some("Service"))?;
    println!("ExecStart: {}", service.get("ExecStart")?.value());
    println!("Environment: {:?}\n", service.get("Environment")?.values());

    // Edit in place
    let service = unit.get_mut(Some("Service"))?;
    service.append_at(
        OptionLine::single("User", "example"),
        "ExecStart",
        Placement::Before,
    )?;
    service.append(OptionLine::single("Restart", "on-failure"));
    service.append(OptionLine::single("RestartSec", 5));
    service.remove_option("Type")?;

    // Add a whole section after [Service]
    let mut install = Section::new("Install");
    install.append(OptionLine::single("WantedBy", "multi-user.target"));
    unit.append(install)?;

    println!("Rendered:\n{}", unit);

    // Write to disk and read back
    let dir = std::env::temp_dir().join("unitfile-demo");
    let path = dir.join("example.service");
    let bytes = unit.write_path(&path)?;
    println!("Wrote {} bytes to {}", bytes, path.display());

    let back = unitfile::from_path(&path)?;
    assert_eq!(back.to_string(), unit.to_string());

    // Section order survives the round trip
    println!("Sections: {:?}", back.section_names().collect::<Vec<_>>());

    Ok(())
}
