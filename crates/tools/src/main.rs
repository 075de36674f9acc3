use anyhow::{Context, Result, bail};
use clap::Parser;
use serde::Serialize;
use whowho_core::{AssetResolver, AvatarService, Board, GameCode, generate_code};

#[derive(Parser)]
#[command(author, version, about = "Print the board a game code produces", long_about = None)]
struct Args {
    /// Five-digit game code
    #[arg(short, long, conflicts_with = "generate")]
    code: Option<String>,
    /// Mint a fresh code from the clock instead of passing one
    #[arg(short, long)]
    generate: bool,
    /// Emit JSON instead of a table
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct SlotReport {
    slot: usize,
    index: u32,
    name: String,
    avatar_url: String,
}

#[derive(Serialize)]
struct BoardReport {
    code: String,
    fingerprint: String,
    slots: Vec<SlotReport>,
}

fn build_report(board: &Board, assets: &dyn AssetResolver) -> BoardReport {
    BoardReport {
        code: board.code().to_string(),
        fingerprint: format!("{:016x}", board.fingerprint()),
        slots: board
            .slots()
            .map(|(slot, character, name)| SlotReport {
                slot: slot.index(),
                index: character.0,
                name: name.to_string(),
                avatar_url: assets.resolve(character),
            })
            .collect(),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let code = match (args.code.as_deref(), args.generate) {
        (Some(raw), _) => {
            GameCode::parse(raw).with_context(|| format!("'{raw}' is not a game code"))?
        }
        (None, true) => generate_code(),
        (None, false) => bail!("pass --code <CODE> or --generate"),
    };

    let board = Board::generate(&code)
        .with_context(|| format!("Failed to generate board for code {code}"))?;
    let report = build_report(&board, &AvatarService::default());

    if args.json {
        let json = serde_json::to_string_pretty(&report).context("Failed to encode report")?;
        println!("{json}");
        return Ok(());
    }

    println!("Code: {}", report.code);
    println!("Fingerprint: {}", report.fingerprint);
    for slot in &report.slots {
        println!("{:>2}  {:>6}  {:<10} {}", slot.slot, slot.index, slot.name, slot.avatar_url);
    }

    Ok(())
}
