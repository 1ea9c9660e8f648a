use inquire::{InquireError, Select};
use swu_database::api::SwuClient;
use swu_database::error::ends_menu;
use swu_database::{analysis_controller, database_controller, query_controller, Settings};
use tracing::error;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let settings = Settings::from_env()?;
    let client = SwuClient::new(&settings)?;

    let user_name = whoami::username();
    println!("Hi, {}! welcome to the Star Wars Unlimited card database.", user_name);

    loop {
        let menu_options: Vec<&str> = vec![
            "Update database",
            "Update database (discover sets)",
            "Query cards",
            "Twin Suns leader analysis",
            "Exit",
        ];
        let menu_ans: Result<&str, InquireError> =
            Select::new("What would you like to do?", menu_options.clone()).prompt();

        let outcome = match menu_ans {
            Ok(choice) => match choice {
                "Update database" => {
                    database_controller::update_database(&client, &settings, false)
                        .await
                        .map(|_| ())
                }
                "Update database (discover sets)" => {
                    database_controller::update_database(&client, &settings, true)
                        .await
                        .map(|_| ())
                }
                "Query cards" => query_controller::run_query_menu(&settings),
                "Twin Suns leader analysis" => analysis_controller::analyze_twin_suns(&settings),
                "Exit" => break,
                _ => {
                    println!("Invalid choice");
                    Ok(())
                }
            },
            Err(e) if ends_menu(&e) => break,
            Err(_) => {
                println!("There was an error, please try again");
                Ok(())
            }
        };

        if let Err(e) = outcome {
            error!("{}", e);
        }
    }

    Ok(())
}
