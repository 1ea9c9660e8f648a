use crate::card::Card;
use crate::config::Settings;
use crate::error::{ends_menu, Result};
use crate::query::{card_line, print_card, CardDatabase};
use inquire::{CustomType, InquireError, Select, Text};

const LIST_LIMIT: usize = 25;

fn show_results(label: &str, cards: &[&Card]) {
    println!("\nFound {} cards {}", cards.len(), label);
    for card in cards.iter().take(LIST_LIMIT) {
        println!("  - {}", card_line(card));
    }
    if cards.len() > LIST_LIMIT {
        println!("  ... and {} more", cards.len() - LIST_LIMIT);
    }
}

fn prompt_text(message: &str) -> Result<String> {
    Ok(Text::new(message).prompt()?.trim().to_string())
}

fn lookup_card(db: &CardDatabase) -> Result<()> {
    let set_code = prompt_text("Set code (e.g. SOR):")?;
    let number = prompt_text("Card number:")?;
    match db.get_card(&set_code, &number) {
        Some(card) => print_card(card),
        None => println!("Card {} #{} not found.", set_code, number),
    }
    Ok(())
}

fn cost_range(db: &CardDatabase) -> Result<()> {
    let min_cost = CustomType::<i64>::new("Minimum cost:")
        .with_default(0)
        .prompt()?;
    let max_cost = CustomType::<i64>::new("Maximum cost:")
        .with_default(99)
        .prompt()?;
    let results = db.filter_by_cost(min_cost, max_cost);
    show_results(&format!("costing {} to {}", min_cost, max_cost), &results);
    Ok(())
}

/// Loads the card JSON once and answers queries against it until the user goes back.
pub fn run_query_menu(settings: &Settings) -> Result<()> {
    let db = CardDatabase::load(&settings.cards_json_path())?;
    if db.is_empty() {
        println!("The card database is empty. Update the database first.");
        return Ok(());
    }

    loop {
        let menu_options: Vec<&str> = vec![
            "Get a specific card",
            "Search by name",
            "Filter by set",
            "Filter by type",
            "Filter by rarity",
            "Filter by trait",
            "Filter by aspect",
            "Filter by cost",
            "List legendaries",
            "List leaders",
            "Back",
        ];
        let menu_ans: std::result::Result<&str, InquireError> =
            Select::new("What would you like to query?", menu_options).prompt();

        match menu_ans {
            Ok(choice) => match choice {
                "Get a specific card" => lookup_card(&db)?,
                "Search by name" => {
                    let name = prompt_text("Name or subtitle contains:")?;
                    show_results(&format!("matching '{}'", name), &db.search_by_name(&name));
                }
                "Filter by set" => {
                    let set_code = prompt_text("Set code:")?;
                    show_results(&format!("in set {}", set_code), &db.filter_by_set(&set_code));
                }
                "Filter by type" => {
                    let card_type = prompt_text("Type (Leader, Unit, Base, Event, Upgrade):")?;
                    show_results(&format!("of type {}", card_type), &db.filter_by_type(&card_type));
                }
                "Filter by rarity" => {
                    let rarity = prompt_text("Rarity:")?;
                    show_results(&format!("of rarity {}", rarity), &db.filter_by_rarity(&rarity));
                }
                "Filter by trait" => {
                    let trait_name = prompt_text("Trait:")?;
                    show_results(
                        &format!("with trait {}", trait_name.to_uppercase()),
                        &db.filter_by_trait(&trait_name),
                    );
                }
                "Filter by aspect" => {
                    let aspect = prompt_text("Aspect:")?;
                    show_results(&format!("with aspect {}", aspect), &db.filter_by_aspect(&aspect));
                }
                "Filter by cost" => cost_range(&db)?,
                "List legendaries" => show_results("of rarity Legendary", &db.get_legendaries()),
                "List leaders" => show_results("of type Leader", &db.get_leaders()),
                "Back" => break,
                _ => println!("Invalid choice"),
            },
            Err(e) if ends_menu(&e) => break,
            Err(_) => println!("There was an error, please try again"),
        }
    }

    Ok(())
}
