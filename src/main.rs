mod config;

use clap::Parser;
use llm::{Completion, LlamaClient, Message, Sampling, SamplingBuilder, SamplingBuilderError};

const DEMO_PROMPT: &str = "What are three interesting facts about Sweden?";

#[derive(Debug, clap::Parser)]
#[command(version, about, long_about = None)]
struct App {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Print compact JSON instead of pretty-printing responses
    #[clap(long, global = true)]
    raw: bool,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Run one text completion and one chat completion
    Demo,

    /// Complete a single prompt
    Text {
        prompt: String,

        #[command(flatten)]
        sampling: SamplingArgs,

        /// Stop sequence; may be given more than once
        #[clap(long)]
        stop: Vec<String>,
    },

    /// Send a conversation
    Chat {
        #[clap(short, long)]
        system: Option<String>,

        /// User message; may be given more than once
        #[clap(short, long, required = true)]
        user: Vec<String>,

        #[command(flatten)]
        sampling: SamplingArgs,
    },
}

#[derive(Debug, Default, clap::Args)]
struct SamplingArgs {
    #[clap(long)]
    max_tokens: Option<u32>,

    #[clap(long)]
    temperature: Option<f64>,

    #[clap(long)]
    top_p: Option<f64>,

    #[clap(long)]
    frequency_penalty: Option<f64>,

    #[clap(long)]
    presence_penalty: Option<f64>,
}

impl SamplingArgs {
    fn build(&self) -> Result<Sampling, SamplingBuilderError> {
        let mut builder = SamplingBuilder::default();
        if let Some(v) = self.max_tokens {
            builder.max_tokens(v);
        }
        if let Some(v) = self.temperature {
            builder.temperature(v);
        }
        if let Some(v) = self.top_p {
            builder.top_p(v);
        }
        if let Some(v) = self.frequency_penalty {
            builder.frequency_penalty(v);
        }
        if let Some(v) = self.presence_penalty {
            builder.presence_penalty(v);
        }
        builder.build()
    }
}

fn print(completion: &Completion, raw: bool) -> Result<(), anyhow::Error> {
    if raw {
        println!("{completion}");
    } else {
        println!("{}", completion.to_pretty()?);
    }
    Ok(())
}

async fn demo(client: &LlamaClient, raw: bool) -> Result<(), anyhow::Error> {
    let sampling = SamplingBuilder::default()
        .max_tokens(500)
        .temperature(0.7)
        .build()?;

    match client.generate_text(DEMO_PROMPT, &sampling, None).await {
        Ok(response) => {
            println!("\nText Generation Response:");
            print(&response, raw)?;
        }
        Err(e) => eprintln!("Error during text generation: {e}"),
    }

    let messages = [
        Message::system("You are a helpful assistant."),
        Message::user(DEMO_PROMPT),
    ];
    match client.generate_chat(&messages, &sampling).await {
        Ok(response) => {
            println!("\nChat Response:");
            print(&response, raw)?;
        }
        Err(e) => eprintln!("Error during chat: {e}"),
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    env_logger::init();

    if let Err(e) = dotenvy::dotenv() {
        log::debug!("No .env loaded: {e}");
    }

    let app = App::parse();
    let config = config::resolve(config::from_env, config::FileConfig::read()?)?;
    log::info!("Using endpoint {}", config.endpoint());
    let client = LlamaClient::new(config)?;

    match app.command.unwrap_or(Commands::Demo) {
        Commands::Demo => demo(&client, app.raw).await,
        Commands::Text {
            prompt,
            sampling,
            stop,
        } => {
            let response = client
                .generate_text(&prompt, &sampling.build()?, Some(stop.as_slice()))
                .await?;
            print(&response, app.raw)
        }
        Commands::Chat {
            system,
            user,
            sampling,
        } => {
            let messages: Vec<Message> = system
                .into_iter()
                .map(Message::system)
                .chain(user.into_iter().map(Message::user))
                .collect();
            let response = client
                .generate_chat(&messages, &sampling.build()?)
                .await?;
            print(&response, app.raw)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_runs_demo() {
        let app = App::try_parse_from(["llama"]).unwrap();
        assert!(app.command.is_none());
        assert!(!app.raw);
    }

    #[test]
    fn text_collects_repeated_stops() {
        let app = App::try_parse_from([
            "llama", "text", "hello", "--stop", "END", "--stop", "###", "--max-tokens", "10",
            "--raw",
        ])
        .unwrap();
        let Some(Commands::Text {
            prompt,
            sampling,
            stop,
        }) = app.command
        else {
            panic!("expected text command");
        };
        assert_eq!(prompt, "hello");
        assert_eq!(stop, vec!["END", "###"]);
        assert_eq!(sampling.build().unwrap().max_tokens, 10);
        assert!(app.raw);
    }

    #[test]
    fn chat_requires_a_user_message() {
        assert!(App::try_parse_from(["llama", "chat", "--system", "be brief"]).is_err());
    }

    #[test]
    fn empty_sampling_args_keep_defaults() {
        assert_eq!(SamplingArgs::default().build().unwrap(), Sampling::default());
    }

    #[test]
    fn invalid_sampling_args_are_rejected() {
        let args = SamplingArgs {
            temperature: Some(3.0),
            ..SamplingArgs::default()
        };
        assert!(args.build().is_err());
    }
}
