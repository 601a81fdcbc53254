//! Subcommand handlers for generate, build, decompile and config actions.

use std::io::Read;
use std::path::{Path, PathBuf};

use super::args::{ConfigAction, GenerateArgs};
use super::enums::OutputFormat;
use crate::config::{default_path as get_config_path, Config, DEFAULT_CONFIG};
use crate::prompt::{parse_import, render_json, render_narrative, ImportedPrompt, PromptDocument};
use crate::veo::{
    progress_channel, CredentialProvider, GenerationClient, GenerationError, GenerationRequest,
    GenerationSettings, ImageReference, InteractiveCredential, StaticCredential, VeoHttpBackend,
    VideoModel, DEFAULT_VIDEO_FILE_NAME,
};

/// Path that means "read from stdin".
const STDIN_PATH: &str = "-";

/// Read text from a file, or from stdin when the path is `-`.
fn read_input(path: &Path) -> Result<String, String> {
    if path.as_os_str() == STDIN_PATH {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .map_err(|e| format!("Failed to read stdin: {}", e))?;
        Ok(text)
    } else {
        std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read '{}': {}", path.display(), e))
    }
}

/// The raw prompt from the positional argument, `--prompt-file`, or stdin.
fn read_prompt(args: &GenerateArgs) -> Result<String, String> {
    match (&args.prompt, &args.prompt_file) {
        (Some(p), _) if p == STDIN_PATH => read_input(Path::new(STDIN_PATH)),
        (Some(p), _) => Ok(p.clone()),
        (None, Some(file)) => read_input(file),
        (None, None) => Ok(String::new()),
    }
}

/// Merge command-line overrides onto the configured settings.
pub fn resolve_settings(args: &GenerateArgs, config: &Config) -> GenerationSettings {
    let mut settings = config.settings();
    if let Some(model) = args.model {
        settings.model = model.into();
    }
    if let Some(aspect) = args.aspect_ratio {
        settings.aspect_ratio = aspect.into();
    }
    if let Some(resolution) = args.resolution {
        settings.resolution = resolution.into();
    }
    settings.enable_sound |= args.sound;
    settings
}

/// User-facing message for a generation failure.
fn describe_error(error: &GenerationError) -> String {
    match error {
        GenerationError::Credential => format!(
            "{}\n\n\
            Add your key to a .env file:\n    \
                echo 'GEMINI_API_KEY=your-api-key-here' >> .env\n\n\
            Or set it in the [api] section of {}, or pass --interactive-key.",
            error,
            get_config_path().display()
        ),
        GenerationError::InvalidOrExpiredCredential => format!(
            "{}\nRun again with --interactive-key to connect a different key.",
            error
        ),
        _ => error.to_string(),
    }
}

/// Run the generate command: resolve the prompt, generate, and save the video.
pub fn run_generate(
    args: GenerateArgs,
    config: &Config,
    env_key: Option<String>,
) -> Result<PathBuf, String> {
    let raw = read_prompt(&args)?;
    let imported = parse_import(&raw);
    if matches!(imported, ImportedPrompt::Structured(_)) {
        println!("Structured prompt detected, converting to narrative.");
    }
    let prompt = imported.into_prompt_text(&raw);

    let image = args
        .image
        .as_deref()
        .map(ImageReference::from_path)
        .transpose()
        .map_err(|e| e.to_string())?;

    let settings = resolve_settings(&args, config);
    let request = GenerationRequest::new(prompt, image, settings);
    request.validate().map_err(|e| e.to_string())?;

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| config.output_dir().join(DEFAULT_VIDEO_FILE_NAME));
    // Materialize next to the destination so saving is a rename.
    let artifact_dir = output
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    let credentials: Box<dyn CredentialProvider> = if args.interactive_key {
        Box::new(InteractiveCredential::new())
    } else {
        Box::new(StaticCredential::new(config.resolve_api_key(env_key)))
    };

    let backend = VeoHttpBackend::with_base_url(config.base_url().to_string())
        .map_err(|e| format!("Failed to create API client: {}", e))?;
    let mut client = GenerationClient::new(backend, credentials, artifact_dir)
        .with_poll_interval(config.poll_interval());

    if args.interactive_key {
        client.connect().map_err(|e| describe_error(&e))?;
    }

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| format!("Failed to create async runtime: {}", e))?;

    let artifact = rt.block_on(async {
        let (tx, mut rx) = progress_channel();
        let printer = tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                println!("{}", event);
            }
        });

        let result = client.generate(&request, &tx).await;
        drop(tx);
        let _ = printer.await;
        result
    });
    let artifact = artifact.map_err(|e| describe_error(&e))?;

    let saved = artifact
        .persist(&output)
        .map_err(|e| format!("Failed to save video to '{}': {}", output.display(), e))?;
    println!();
    println!("Video saved: {}", saved.display());
    Ok(saved)
}

/// Render a prompt document in one format, or all three under headings.
pub fn run_build(doc_path: &Path, format: Option<OutputFormat>) -> Result<(), String> {
    let doc = PromptDocument::load(doc_path).map_err(|e| e.to_string())?;
    print!("{}", render_build(&doc, format));
    Ok(())
}

/// Text printed by `build`.
pub fn render_build(doc: &PromptDocument, format: Option<OutputFormat>) -> String {
    let render = |format: OutputFormat| match format.locale() {
        Some(locale) => render_narrative(doc, locale),
        None => render_json(doc),
    };

    match format {
        Some(format) => format!("{}\n", render(format)),
        None => {
            let mut out = String::new();
            for (heading, format) in [
                ("Indonesian", OutputFormat::Indonesian),
                ("English", OutputFormat::English),
                ("JSON", OutputFormat::Json),
            ] {
                out.push_str(&format!("== {} ==\n{}\n\n", heading, render(format)));
            }
            out
        }
    }
}

/// Write a starter prompt document.
pub fn run_build_init(path: &Path, force: bool) -> Result<(), String> {
    if path.exists() && !force {
        return Err(format!(
            "'{}' already exists. Use --force to overwrite it.",
            path.display()
        ));
    }

    let content = PromptDocument::starter()
        .to_toml()
        .map_err(|e| format!("Failed to serialize document: {}", e))?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("Error creating directory: {}", e))?;
    }
    std::fs::write(path, content)
        .map_err(|e| format!("Error writing '{}': {}", path.display(), e))?;

    println!("Created prompt document: {}", path.display());
    println!(
        "Render it with 'veo-studio build {}'.",
        path.display()
    );
    Ok(())
}

/// Print the prompt text a file would submit.
pub fn run_decompile(path: &Path) -> Result<(), String> {
    let input = read_input(path)?;
    let imported = parse_import(&input);
    if matches!(imported, ImportedPrompt::PlainText(_)) {
        log::info!("Input is not a structured prompt, printing it unchanged");
    }
    println!("{}", imported.into_prompt_text(&input));
    Ok(())
}

/// Handle config subcommand actions.
pub fn handle_config_action(
    action: ConfigAction,
    config_path: Option<&Path>,
    config: &Config,
    env_key: Option<String>,
) -> Result<(), String> {
    let config_path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(get_config_path);

    match action {
        ConfigAction::Show => {
            let settings = config.settings();
            println!("Current configuration:");
            println!("  API base URL: {}", config.base_url());
            println!("  API key: {}", config.api_key_source(env_key.as_deref()));
            println!("  Model: {}", settings.model);
            println!("  Aspect ratio: {}", settings.aspect_ratio.as_str());
            println!("  Resolution: {}", settings.resolution.as_str());
            println!("  Sound: {}", if settings.enable_sound { "yes" } else { "no" });
            println!("  Poll interval: {}s", config.poll_interval().as_secs());
            println!("  Output dir: {}", config.output_dir().display());
            println!();

            println!("Available models:");
            for model in VideoModel::ALL {
                println!("  {:<32} {}", model.id(), model.description());
            }
            println!();

            if config_path.exists() {
                println!("Config file: {} (exists)", config_path.display());
            } else {
                println!("Config file: {} (not found)", config_path.display());
            }
            Ok(())
        }
        ConfigAction::Init => {
            if config_path.exists() {
                return Err(format!(
                    "Config file already exists: {}\n\
                    Use 'veo-studio config show' to view current settings.",
                    config_path.display()
                ));
            }

            if let Some(parent) = config_path.parent() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| format!("Error creating config directory: {}", e))?;
            }

            std::fs::write(&config_path, DEFAULT_CONFIG)
                .map_err(|e| format!("Error writing config file: {}", e))?;

            println!("Created config file: {}", config_path.display());
            Ok(())
        }
    }
}
