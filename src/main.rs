fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 3 {
        eprintln!("Usage: {} <buildings.json> <free text...>", args[0]);
        return Ok(());
    }

    let payload = wayin::BuildingsPayload::from_json(&std::fs::read_to_string(&args[1])?)?;
    let query = args[2..].join(" ");

    if let Some(matched) = wayin::extract_room_from_text(&query, &payload) {
        let result = &matched.result;
        println!("{}", result.room.id);
        println!("  Building: {}", matched.building_key);
        println!("  Floor: {} ({})", result.floor_key, result.floor.original_name);
        println!("  Position: {}, {}", result.room.x, result.room.y);
        match result.entrance {
            Some(entrance) => {
                println!(
                    "  Nearest entrance: {} at {}, {}",
                    entrance.text, entrance.x, entrance.y
                );
            }
            None => println!("  Nearest entrance: none"),
        }
    } else {
        println!("No room found");
    }

    Ok(())
}
