use whowho_core::{CodeError, GameCode};

/// How the app should start, decided from the command line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CodeChoice {
    Cli(GameCode),
    /// A code was given but is not five digits; the app falls back to the start screen.
    Rejected { raw: String, error: CodeError },
    StartScreen,
}

pub fn resolve_code_from_args(args: &[String]) -> Result<CodeChoice, String> {
    let mut selected_code: Option<&str> = None;
    let mut index = 1usize;

    while index < args.len() {
        let argument = args[index].as_str();

        if argument == "--code" {
            let Some(value) = args.get(index + 1) else {
                return Err("missing value for --code".to_string());
            };
            if selected_code.is_some() {
                return Err("code provided more than once".to_string());
            }
            selected_code = Some(value.as_str());
            index += 2;
            continue;
        }

        if let Some(value) = argument.strip_prefix("--code=") {
            if selected_code.is_some() {
                return Err("code provided more than once".to_string());
            }
            selected_code = Some(value);
        }
        index += 1;
    }

    Ok(match selected_code {
        Some(raw) => match GameCode::parse(raw) {
            Ok(code) => CodeChoice::Cli(code),
            Err(error) => CodeChoice::Rejected { raw: raw.to_string(), error },
        },
        None => CodeChoice::StartScreen,
    })
}
