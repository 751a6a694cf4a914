use clap::{Parser, Subcommand};
use folio_core::{
    resolve_data_dir, BlogError, DocumentService, DocumentSummary, SignatureVerifier, Slug,
    TagService,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Folio blog document store CLI")]
struct Cli {
    /// Document directory (overrides BLOG_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List posts, newest first
    List {
        /// Include drafts
        #[arg(long)]
        all: bool,
    },
    /// Print one post's metadata and body
    Show {
        /// Post slug
        slug: String,
    },
    /// List tags with post counts
    Tags,
    /// Print the slug a title would receive
    Slug {
        /// Post title
        title: String,
    },
    /// Sign a webhook payload file with WEBHOOK_SECRET
    Sign {
        /// Payload file, signed byte-for-byte
        file: PathBuf,
    },
    /// Check a webhook payload file against a signature
    Verify {
        /// Payload file
        file: PathBuf,
        /// Signature, with or without the `sha256=` prefix
        signature: String,
    },
}

/// Read commands only need the storage directory; no secrets are required.
fn documents(data_dir: Option<PathBuf>) -> DocumentService {
    match data_dir {
        Some(dir) => DocumentService::at(dir),
        None => DocumentService::at(resolve_data_dir(std::env::var("BLOG_DATA_DIR").ok())),
    }
}

fn webhook_verifier(secret: Option<String>) -> Result<SignatureVerifier, BlogError> {
    let secret = secret
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| BlogError::Config("WEBHOOK_SECRET must be set".into()))?;
    SignatureVerifier::new(secret.as_bytes())
}

fn print_summary(post: &DocumentSummary) {
    let draft = if post.draft { " [draft]" } else { "" };
    let tags = if post.tags.is_empty() {
        String::new()
    } else {
        format!(" ({})", post.tags.join(", "))
    };
    println!(
        "{}  {}  {}{}{}",
        post.date.format("%Y-%m-%d"),
        post.slug,
        post.title,
        draft,
        tags
    );
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::List { all }) => {
            let documents = documents(cli.data_dir);
            let posts = if all {
                documents.list()?
            } else {
                documents.list_published()?
            };
            if posts.is_empty() {
                println!("No posts found.");
            }
            for post in &posts {
                print_summary(post);
            }
        }
        Some(Commands::Show { slug }) => {
            let doc = documents(cli.data_dir).get(&slug)?;
            print_summary(&doc.summary());
            println!("file: {}", doc.file_name);
            if let Some(summary) = &doc.metadata.summary {
                println!("summary: {summary}");
            }
            println!();
            print!("{}", doc.body);
        }
        Some(Commands::Tags) => {
            let tags = TagService::new(documents(cli.data_dir));
            let tags = tags.list_tags()?;
            if tags.is_empty() {
                println!("No tags found.");
            }
            for tag in tags {
                println!("{:>4}  {}", tag.count, tag.name);
            }
        }
        Some(Commands::Slug { title }) => {
            println!("{}", Slug::from_title(&title)?);
        }
        Some(Commands::Sign { file }) => {
            let verifier = webhook_verifier(std::env::var("WEBHOOK_SECRET").ok())?;
            let payload = std::fs::read(&file)?;
            println!("{}", verifier.sign(&payload));
        }
        Some(Commands::Verify { file, signature }) => {
            let verifier = webhook_verifier(std::env::var("WEBHOOK_SECRET").ok())?;
            let payload = std::fs::read(&file)?;
            if !verifier.verify(&payload, Some(&signature)) {
                return Err("signature does not match".into());
            }
            println!("Signature OK");
        }
        None => {
            println!("Use 'folio --help' for commands");
        }
    }

    Ok(())
}
