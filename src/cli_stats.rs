use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli_style;

use cli_style::{
    get_prompt, get_styles, print_empty_list, print_error, print_key_value, print_list_item,
    print_section_footer, print_section_header, print_success, print_warning, print_welcome,
    render_bar, TableBuilder,
};
use lyrics_stats_server::config::resolve_dashboard_settings;
use lyrics_stats_server::corpus::{initialize_corpus, Corpus};
use lyrics_stats_server::dashboard::{
    artist_options, DashboardSettings, DashboardState, DashboardView, DEFAULT_ALL_ARTISTS_LABEL,
};
use lyrics_stats_server::query::{ChartAxis, DEFAULT_SEARCH_TERM};

use rustyline::{
    completion::Completer, highlight::Highlighter, history::FileHistory, validate::Validator,
    CompletionType, Config, Editor, Helper,
};

const BAR_WIDTH: usize = 24;

fn parse_path(s: &str) -> Result<PathBuf> {
    let original_path = PathBuf::from(s);
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
#[command(styles=get_styles())]
struct CliArgs {
    /// Path to the lyrics corpus JSON file.
    #[clap(value_parser = parse_path)]
    pub corpus_path: PathBuf,

    /// Word charted across artists when no search term is given.
    #[clap(long, default_value = DEFAULT_SEARCH_TERM)]
    pub default_search_term: String,

    /// Label of the all-artists entry.
    #[clap(long, default_value = DEFAULT_ALL_ARTISTS_LABEL)]
    pub all_artists_label: String,
}

#[derive(Parser)]
#[command(styles=get_styles(),name = "")]
struct InnerCli {
    #[command(subcommand)]
    command: InnerCommand,
}

#[derive(Subcommand)]
enum InnerCommand {
    /// Selects an artist, the chart then shows that artist's top words.
    Artist { name: String },

    /// Selects the all-artists view, the chart then compares artists.
    All,

    /// Sets the word compared across artists.
    Search { term: String },

    /// Shows the chart and statistics of the current selection.
    Show,

    /// Lists the selectable artists.
    Artists,

    /// Close this program.
    Exit,
}

enum CommandExecutionResult {
    Ok,
    Exit,
    Error(String),
}

struct Session {
    corpus: Corpus,
    settings: DashboardSettings,
    state: DashboardState,
}

fn dashboard_settings(cli_args: &CliArgs) -> Result<DashboardSettings> {
    resolve_dashboard_settings(&cli_args.default_search_term, &cli_args.all_artists_label)
}

fn chart_title(view: &DashboardView) -> String {
    match (view.chart.axis, view.chart.search_term.as_deref()) {
        (ChartAxis::Artist, Some(term)) => format!("Occurrences of \"{}\" per song", term),
        _ => format!("Top words of {}", view.selection),
    }
}

fn print_view(view: &DashboardView) {
    print_section_header(&chart_title(view));
    if view.chart.is_empty() {
        print_empty_list("Nothing to chart for this selection");
    } else {
        let max = view
            .chart
            .entries
            .iter()
            .map(|e| e.value)
            .fold(0.0_f64, f64::max);
        let mut table = TableBuilder::new(vec![
            "#",
            view.chart.axis_title,
            view.chart.value_axis_title,
            "",
        ]);
        for (position, entry) in view.chart.entries.iter().enumerate() {
            table.add_row(vec![
                (position + 1).to_string(),
                entry.label.clone(),
                format!("{:.2}", entry.value),
                render_bar(entry.value, max, BAR_WIDTH),
            ]);
        }
        table.print();
    }
    print_section_footer();

    if let Some(stats) = &view.stats {
        print_section_header(&format!("Statistics of {}", stats.artist));
        for (label, value) in stats.labeled_values() {
            print_key_value(label, &value);
        }
        print_section_footer();
    }
}

fn execute_command(line: String, session: &mut Session) -> CommandExecutionResult {
    if line.is_empty() {
        return CommandExecutionResult::Ok;
    }

    let args =
        shlex::split(&line).unwrap_or_else(|| line.split_whitespace().map(String::from).collect());

    let cli = InnerCli::try_parse_from(std::iter::once(" ").chain(args.iter().map(String::as_str)));

    match cli {
        Ok(cli) => {
            println!("{} {}", get_prompt(), &line);
            match cli.command {
                InnerCommand::Artist { name } => {
                    let known = name == session.settings.all_artists_label
                        || session.corpus.get_artist(&name).is_some();
                    session.state.select_artist(&name, &session.settings);
                    if !known {
                        return CommandExecutionResult::Error(format!(
                            "Unknown artist \"{}\", the view will be empty",
                            name
                        ));
                    }
                    print_success(&format!("Selected {}", name));
                }
                InnerCommand::All => {
                    let label = session.settings.all_artists_label.clone();
                    session.state.select_artist(&label, &session.settings);
                    print_success(&format!("Selected {}", label));
                }
                InnerCommand::Search { term } => {
                    session.state.set_search_term(&term);
                    if session.state.search_visible() {
                        print_success(&format!("Searching for \"{}\"", term.trim()));
                    } else {
                        print_warning(
                            "Search only applies to the all-artists view, it will be used there",
                        );
                    }
                }
                InnerCommand::Show => {
                    let view = session.state.render(&session.corpus, &session.settings);
                    print_view(&view);
                }
                InnerCommand::Artists => {
                    let options = artist_options(&session.corpus, &session.settings);
                    let selected = session
                        .state
                        .selector()
                        .label(&session.settings.all_artists_label)
                        .to_owned();
                    print_section_header("Artists");
                    for option in options.options.iter() {
                        print_list_item(option, *option == selected);
                    }
                    print_section_footer();
                }
                InnerCommand::Exit => return CommandExecutionResult::Exit,
            }
        }

        Err(e) => {
            if e.print().is_err() {
                println!("{}", e);
            }
        }
    }
    CommandExecutionResult::Ok
}

#[derive(rustyline_derive::Hinter)]
struct MyHelper {
    commands_names: Vec<String>,
}

impl MyHelper {
    pub fn new() -> Self {
        let commands_names: Vec<String> = InnerCli::command()
            .get_subcommands()
            .map(|sc| sc.get_name().to_string())
            .collect();

        MyHelper { commands_names }
    }
}

impl Completer for MyHelper {
    type Candidate = String;

    fn complete(
        &self,
        line: &str,
        _pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<String>)> {
        if line.contains(' ') {
            return Ok((0, Vec::with_capacity(0)));
        }
        let matches = self
            .commands_names
            .iter()
            .filter(|c| c.starts_with(line))
            .map(|c| c.to_string())
            .collect::<Vec<_>>();

        Ok((0, matches))
    }
}

impl Highlighter for MyHelper {}
impl Validator for MyHelper {}
impl Helper for MyHelper {}

fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()?;

    let settings = dashboard_settings(&cli_args)?;
    let corpus = initialize_corpus(&cli_args.corpus_path)?;

    print_welcome(
        &cli_args.corpus_path.display().to_string(),
        &[
            ("Artists", corpus.get_artists_count().to_string()),
            ("Songs", corpus.get_songs_count().to_string()),
            ("Distinct words", corpus.get_words_count().to_string()),
        ],
    );
    InnerCli::command().print_long_help()?;

    let mut session = Session {
        corpus,
        settings,
        state: DashboardState::default(),
    };

    let config = Config::builder()
        .completion_type(CompletionType::List)
        .build();

    let mut rl = Editor::<MyHelper, FileHistory>::with_config(config)?;
    rl.set_helper(Some(MyHelper::new()));

    let prompt = get_prompt();
    loop {
        match rl.readline(&prompt) {
            Ok(line) => {
                let _ = rl.add_history_entry(&line);
                match execute_command(line.trim().to_owned(), &mut session) {
                    CommandExecutionResult::Ok => {}
                    CommandExecutionResult::Exit => {
                        break;
                    }
                    CommandExecutionResult::Error(err) => {
                        print_error(&err);
                        continue;
                    }
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("CTRL-D: exiting.");
                break;
            }
            Err(e) => {
                print_error(&format!("{:?}", e));
                break;
            }
        }
    }
    Ok(())
}
