use std::process::ExitCode;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use secrecy::ExposeSecret;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::{error, info};

use allergy_card::adapters::{
    FileCardStore, HttpTranslationConfig, HttpTranslationService, InMemoryCardStore,
};
use allergy_card::application::{
    CreateCardCommand, CreateCardHandler, DeleteCardCommand, DeleteCardHandler, GetCardHandler,
    GetCardQuery, ListCardsHandler, ListCardsQuery, ListCardsResult, TranslateCardCommand,
    TranslateCardHandler,
};
use allergy_card::config::{self, AppConfig, ConfigError, StorageBackend};
use allergy_card::domain::card::{
    AllergyCard, CardError, FoodAllergen, LanguageCode, SymptomList, COMMON_ALLERGENS,
    COMMON_SYMPTOMS,
};
use allergy_card::domain::foundation::{CardId, ValidationError};
use allergy_card::domain::questionnaire::{
    standard_graph, AssessmentError, AssessmentResult, AssessmentSession, GraphError,
    SeverityResolver, StepOutcome,
};
use allergy_card::ports::{CardStore, TranslationError, TranslationService};
use allergy_card::telemetry;

#[derive(Parser)]
#[command(name = "allergy-card", about = "Assess a food allergy and build a translatable allergy card")]
#[command(version, propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Answer the questionnaire and create a new card
    New(NewArgs),
    /// List saved cards, newest first
    List {
        /// Show at most this many cards
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Show one saved card
    Show {
        /// Card ID
        card_id: CardId,
    },
    /// Translate a saved card
    Translate {
        /// Card ID
        card_id: CardId,
        /// Target language (e.g. es, ja)
        #[arg(long = "to", value_parser = parse_language)]
        target: LanguageCode,
    },
    /// Delete a saved card
    Delete {
        /// Card ID
        card_id: CardId,
    },
}

#[derive(Args)]
struct NewArgs {
    /// Food allergen; asked interactively when omitted
    #[arg(short, long)]
    allergen: Option<String>,

    /// Language the card is written in
    #[arg(short, long, default_value = "en", value_parser = parse_language)]
    language: LanguageCode,

    /// Translate the finished card into this language
    #[arg(short, long, value_parser = parse_language)]
    translate_to: Option<LanguageCode>,
}

fn parse_language(s: &str) -> Result<LanguageCode, String> {
    s.parse().map_err(|e: ValidationError| e.to_string())
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] config::ValidationError),

    #[error("failed to initialise logging: {0}")]
    Telemetry(String),

    #[error("question tree is inconsistent: {0}")]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Assessment(#[from] AssessmentError),

    #[error(transparent)]
    Card(#[from] CardError),

    #[error(transparent)]
    Translation(#[from] TranslationError),

    #[error("translation is disabled: set ALLERGY_CARD__TRANSLATION__API_KEY to enable it")]
    TranslationDisabled,

    #[error("input closed before the card was finished")]
    InputClosed,

    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "allergy-card failed");
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = AppConfig::load()?;
    config.validate()?;
    telemetry::init_tracing(&config.logging, cli.verbose)
        .map_err(|e| CliError::Telemetry(e.to_string()))?;

    let store: Arc<dyn CardStore> = match config.storage.backend {
        StorageBackend::Memory => Arc::new(InMemoryCardStore::new()),
        StorageBackend::File => Arc::new(FileCardStore::new(&config.storage.path)),
    };
    info!(backend = ?config.storage.backend, "Card store ready");

    match cli.command {
        Commands::New(args) => new_card(&config, store, args).await,
        Commands::List { limit } => list_cards(&config, store, limit).await,
        Commands::Show { card_id } => show_card(store, card_id).await,
        Commands::Translate { card_id, target } => {
            translate_card(&config, store, card_id, target).await
        }
        Commands::Delete { card_id } => delete_card(store, card_id).await,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Commands
// ─────────────────────────────────────────────────────────────────────────────

async fn new_card(
    config: &AppConfig,
    store: Arc<dyn CardStore>,
    args: NewArgs,
) -> Result<(), CliError> {
    // A broken question tree is fatal before any user interaction.
    let graph = standard_graph()?;

    let mut input = BufReader::new(tokio::io::stdin()).lines();

    let allergen = match args.allergen {
        Some(name) => FoodAllergen::try_new(&name).map_err(CardError::from)?,
        None => ask_allergen(&mut input).await?,
    };

    let session = AssessmentSession::start(graph, SeverityResolver::standard());
    let result = run_questionnaire(session, &allergen, &mut input).await?;

    println!();
    println!("Severity: {}", result.severity.level.human_readable());
    println!("{}", result.severity.description);

    let symptoms = ask_symptoms(&mut input).await?;
    let medication = ask_line(&mut input, "Emergency medication (blank for none): ").await?;

    let card = CreateCardHandler::new(store.clone())
        .handle(CreateCardCommand {
            allergen: allergen.as_str().to_string(),
            assessment: result,
            symptoms,
            emergency_medication: Some(medication),
            language: args.language,
        })
        .await?;

    println!();
    println!("{}", format_card(&card));

    if let Some(target) = args.translate_to {
        match translate_card(config, store, card.id(), target).await {
            Err(CliError::TranslationDisabled) => {
                println!();
                println!("{}", CliError::TranslationDisabled);
            }
            other => other?,
        }
    }

    Ok(())
}

async fn list_cards(
    config: &AppConfig,
    store: Arc<dyn CardStore>,
    limit: Option<usize>,
) -> Result<(), CliError> {
    let result = ListCardsHandler::new(store)
        .handle(ListCardsQuery { limit })
        .await?;

    print!("{}", format_card_list(&result));
    if result.total == 0 && config.storage.backend == StorageBackend::Memory {
        println!("Cards are kept in memory; set ALLERGY_CARD__STORAGE__BACKEND=file to keep them.");
    }
    Ok(())
}

async fn show_card(store: Arc<dyn CardStore>, card_id: CardId) -> Result<(), CliError> {
    let card = GetCardHandler::new(store)
        .handle(GetCardQuery { card_id })
        .await?;

    println!("{}", format_card(&card));
    println!();
    println!("Answers:");
    for record in card.questionnaire_responses() {
        println!("  {}", record.question);
        println!("    {}", record.response);
    }
    Ok(())
}

async fn translate_card(
    config: &AppConfig,
    store: Arc<dyn CardStore>,
    card_id: CardId,
    target: LanguageCode,
) -> Result<(), CliError> {
    let translation = &config.translation;
    let api_key = translation
        .api_key
        .as_ref()
        .filter(|_| translation.is_enabled())
        .ok_or(CliError::TranslationDisabled)?;

    let service: Arc<dyn TranslationService> = Arc::new(HttpTranslationService::new(
        HttpTranslationConfig::new(api_key.expose_secret().clone())
            .with_base_url(translation.base_url.clone())
            .with_model(translation.model.clone())
            .with_timeout(translation.timeout())
            .with_max_retries(translation.max_retries),
    )?);

    let result = TranslateCardHandler::new(store, service)
        .handle(TranslateCardCommand { card_id, target })
        .await?;

    println!();
    println!("──── {} ({}) ────", target.native_name(), target.english_name());
    println!("{}", result.translated);
    Ok(())
}

async fn delete_card(store: Arc<dyn CardStore>, card_id: CardId) -> Result<(), CliError> {
    DeleteCardHandler::new(store)
        .handle(DeleteCardCommand { card_id })
        .await?;
    println!("Card {} deleted", card_id);
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Rendering
// ─────────────────────────────────────────────────────────────────────────────

fn format_card(card: &AllergyCard) -> String {
    format!(
        "──── Allergy card {} ────\n{}\nCreated {}",
        card.id(),
        card.summary().render(),
        card.created_at().display_date()
    )
}

fn format_card_list(result: &ListCardsResult) -> String {
    if result.total == 0 {
        return "No cards saved yet\n".to_string();
    }

    let mut out = format!(
        "{} card(s), {} high risk\n\n",
        result.total, result.high_risk_count
    );
    for card in &result.cards {
        let marker = if card.is_high_risk() { " !" } else { "" };
        out.push_str(&format!(
            "  {}  {} ({}){}  {}\n",
            card.id(),
            card.food_allergen(),
            card.severity_level().human_readable(),
            marker,
            card.created_at().display_date()
        ));
    }
    out
}

// ─────────────────────────────────────────────────────────────────────────────
// Prompts
// ─────────────────────────────────────────────────────────────────────────────

async fn ask_line(input: &mut Lines<BufReader<Stdin>>, prompt: &str) -> Result<String, CliError> {
    use std::io::Write;
    print!("{}", prompt);
    std::io::stdout().flush()?;
    input.next_line().await?.ok_or(CliError::InputClosed)
}

async fn ask_allergen(input: &mut Lines<BufReader<Stdin>>) -> Result<FoodAllergen, CliError> {
    println!("What food are you allergic to?");
    println!("Common: {}", COMMON_ALLERGENS.join(", "));
    loop {
        let line = ask_line(input, "> ").await?;
        match FoodAllergen::try_new(&line) {
            Ok(allergen) => return Ok(allergen),
            Err(err) => println!("{}", err),
        }
    }
}

async fn run_questionnaire(
    mut session: AssessmentSession<'static>,
    allergen: &FoodAllergen,
    input: &mut Lines<BufReader<Stdin>>,
) -> Result<AssessmentResult, CliError> {
    loop {
        let progress = session.progress();
        let prompt = session.current_prompt(allergen.as_str())?;
        let options = session.current_options()?;

        println!();
        println!(
            "Question {} ({}% of the way)",
            progress.question_number(),
            progress.percentage().value()
        );
        println!("{}", prompt);
        for (i, option) in options.iter().enumerate() {
            println!("  {}. {}", i + 1, option);
        }

        let line = ask_line(input, "> ").await?;
        let Some(chosen) = pick_option(&line, &options) else {
            println!("Please enter a number between 1 and {}.", options.len());
            continue;
        };

        if let StepOutcome::Done(result) = session.submit_answer(chosen, &prompt)? {
            return Ok(result);
        }
    }
}

/// Accepts a 1-based option number or the exact option text.
fn pick_option<'a>(line: &str, options: &[&'a str]) -> Option<&'a str> {
    let line = line.trim();
    match line.parse::<usize>() {
        Ok(n) if (1..=options.len()).contains(&n) => Some(options[n - 1]),
        Ok(_) => None,
        Err(_) => options.iter().copied().find(|o| *o == line),
    }
}

async fn ask_symptoms(input: &mut Lines<BufReader<Stdin>>) -> Result<Vec<String>, CliError> {
    println!();
    println!("Symptoms you usually experience (optional):");
    for (i, symptom) in COMMON_SYMPTOMS.iter().enumerate() {
        println!("  {}. {}", i + 1, symptom);
    }
    let line = ask_line(input, "Numbers or your own words, comma separated: ").await?;
    Ok(parse_symptoms(&line).map_err(CardError::from)?.into())
}

/// Comma-separated symptoms; numbers pick from the common list.
fn parse_symptoms(line: &str) -> Result<SymptomList, ValidationError> {
    let mut symptoms = SymptomList::new();
    for part in line.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let symptom = match part.parse::<usize>() {
            Ok(n) if (1..=COMMON_SYMPTOMS.len()).contains(&n) => COMMON_SYMPTOMS[n - 1],
            _ => part,
        };
        symptoms.add(symptom)?;
    }
    Ok(symptoms)
}
