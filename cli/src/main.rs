mod seed;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use recipebox_core::{
    format_ingredients, EditDraft, HttpRecipeApi, Recipe, RecipeForm, RecipeFormView, RecipeId,
    RecipeListView,
};
use std::io::{self, BufRead, Write};
use std::time::Duration;

#[derive(Parser)]
#[command(name = "recipebox")]
#[command(about = "Browse and manage a recipebox collection", long_about = None)]
struct Cli {
    /// Server URL
    #[arg(long, global = true, env = "RECIPEBOX_SERVER", default_value = "http://localhost:5000")]
    server: String,

    /// Per-request timeout in seconds
    #[arg(long, global = true, env = "RECIPEBOX_TIMEOUT_SECS", default_value_t = 10)]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List recipes, optionally filtered by title
    List {
        /// Case-insensitive title substring
        #[arg(long, short)]
        search: Option<String>,
    },
    /// Create a recipe
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: Option<String>,
        /// One ingredient; repeat for each
        #[arg(long = "ingredient", required = true)]
        ingredients: Vec<String>,
        #[arg(long)]
        instructions: String,
        #[arg(long)]
        cuisine_type: String,
        /// Minutes
        #[arg(long)]
        cooking_time: u32,
    },
    /// Edit a recipe; only the given fields change
    Edit {
        id: String,
        #[command(flatten)]
        changes: FieldChanges,
    },
    /// Delete a recipe after confirmation
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
    /// Add a set of sample recipes
    Seed,
}

#[derive(Args, Debug, Default)]
struct FieldChanges {
    #[arg(long)]
    title: Option<String>,
    /// Replacement description; pass an empty string to clear it
    #[arg(long)]
    description: Option<String>,
    /// Replaces the whole ingredient list; repeat for each
    #[arg(long = "ingredient")]
    ingredients: Vec<String>,
    #[arg(long)]
    instructions: Option<String>,
    #[arg(long)]
    cuisine_type: Option<String>,
    #[arg(long)]
    cooking_time: Option<u32>,
}

impl FieldChanges {
    fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.ingredients.is_empty()
            && self.instructions.is_none()
            && self.cuisine_type.is_none()
            && self.cooking_time.is_none()
    }

    fn apply(self, draft: &mut EditDraft) {
        let fields = &mut draft.fields;
        if let Some(title) = self.title {
            fields.title = title;
        }
        if let Some(description) = self.description {
            fields.description = Some(description).filter(|d| !d.trim().is_empty());
        }
        if !self.ingredients.is_empty() {
            fields.ingredients = self.ingredients;
        }
        if let Some(instructions) = self.instructions {
            fields.instructions = instructions;
        }
        if let Some(cuisine_type) = self.cuisine_type {
            fields.cuisine_type = cuisine_type;
        }
        if let Some(cooking_time) = self.cooking_time {
            fields.cooking_time = cooking_time;
        }
    }
}

fn render_card(recipe: &Recipe) -> String {
    let fields = &recipe.fields;
    let mut card = format!(
        "{}  [{}, {} min]\n  id: {}\n",
        fields.title, fields.cuisine_type, fields.cooking_time, recipe.id
    );
    if let Some(description) = &fields.description {
        card.push_str(&format!("  {}\n", description));
    }
    card.push_str(&format!(
        "  Ingredients: {}\n",
        format_ingredients(&fields.ingredients)
    ));
    for line in fields.instructions.lines() {
        card.push_str(&format!("  | {}\n", line));
    }
    card
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("Failed to read confirmation")?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

async fn load(api: &HttpRecipeApi) -> Result<RecipeListView> {
    let mut view = RecipeListView::new();
    view.load(api)
        .await
        .with_context(|| format!("Failed to load recipes from {}", api.base_url()))?;
    Ok(view)
}

async fn list(api: &HttpRecipeApi, search: Option<String>) -> Result<()> {
    let mut view = load(api).await?;
    if let Some(query) = search {
        view.set_query(query);
    }

    let visible = view.visible();
    if visible.is_empty() {
        println!("No recipes found.");
        return Ok(());
    }
    for recipe in visible {
        println!("{}", render_card(recipe));
    }
    Ok(())
}

async fn create(api: &HttpRecipeApi, form: RecipeForm) -> Result<()> {
    let mut view = RecipeFormView::new();
    *view.form_mut() = form;
    let recipe = view.submit(api).await.context("Failed to create recipe")?;
    println!("Created recipe {}", recipe.id);
    println!("{}", render_card(&recipe));
    Ok(())
}

async fn edit(api: &HttpRecipeApi, id: RecipeId, changes: FieldChanges) -> Result<()> {
    if changes.is_empty() {
        bail!("Nothing to change; pass at least one field option");
    }

    let mut view = load(api).await?;
    let draft = view
        .begin_edit(&id)
        .with_context(|| format!("Cannot edit {}", id))?;
    changes.apply(draft);

    let recipe = view
        .submit_edit(api)
        .await
        .with_context(|| format!("Failed to update recipe {}", id))?;
    println!("Updated recipe {}", recipe.id);
    println!("{}", render_card(&recipe));
    Ok(())
}

async fn delete(api: &HttpRecipeApi, id: RecipeId, yes: bool) -> Result<()> {
    let mut view = load(api).await?;
    let token = view
        .request_delete(&id)
        .with_context(|| format!("Cannot delete {}", id))?;

    let title = view.get(&id).map(|r| r.title().to_string()).unwrap_or_default();
    if !yes && !confirm(&format!("Delete \"{}\"?", title))? {
        view.cancel_delete(token)?;
        println!("Cancelled.");
        return Ok(());
    }

    view.confirm_delete(token, api)
        .await
        .with_context(|| format!("Failed to delete recipe {}", id))?;
    println!("Deleted \"{}\"", title);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let api = HttpRecipeApi::builder()
        .base_url(cli.server)
        .timeout(Duration::from_secs(cli.timeout_secs.max(1)))
        .build()
        .context("Failed to create HTTP client")?;
    tracing::debug!(server = %api.base_url(), "using recipe server");

    match cli.command {
        Commands::List { search } => list(&api, search).await?,
        Commands::Create {
            title,
            description,
            ingredients,
            instructions,
            cuisine_type,
            cooking_time,
        } => {
            let form = RecipeForm {
                title,
                description: description.unwrap_or_default(),
                ingredients,
                instructions,
                cuisine_type,
                cooking_time: Some(cooking_time),
            };
            create(&api, form).await?
        }
        Commands::Edit { id, changes } => edit(&api, RecipeId::from(id), changes).await?,
        Commands::Delete { id, yes } => delete(&api, RecipeId::from(id), yes).await?,
        Commands::Seed => {
            seed::seed(&api).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use recipebox_core::RecipeFields;

    fn soup() -> Recipe {
        Recipe {
            id: RecipeId::new("r1"),
            fields: RecipeFields {
                title: "Soup".to_string(),
                description: Some("Warm".to_string()),
                ingredients: vec!["stock".to_string(), "salt, to taste".to_string()],
                instructions: "heat\nserve".to_string(),
                cuisine_type: "French".to_string(),
                cooking_time: 20,
            },
        }
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_create_with_repeated_ingredients() {
        let cli = Cli::try_parse_from([
            "recipebox",
            "create",
            "--title",
            "Tea",
            "--ingredient",
            "water",
            "--ingredient",
            "leaves",
            "--instructions",
            "boil",
            "--cuisine-type",
            "Asian",
            "--cooking-time",
            "5",
        ])
        .unwrap();

        match cli.command {
            Commands::Create { ingredients, cooking_time, .. } => {
                assert_eq!(ingredients, vec!["water", "leaves"]);
                assert_eq!(cooking_time, 5);
            }
            _ => panic!("expected create"),
        }
    }

    #[test]
    fn test_create_requires_an_ingredient() {
        let result = Cli::try_parse_from([
            "recipebox",
            "create",
            "--title",
            "Tea",
            "--instructions",
            "boil",
            "--cuisine-type",
            "Asian",
            "--cooking-time",
            "5",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_render_card() {
        let card = render_card(&soup());
        assert!(card.starts_with("Soup  [French, 20 min]\n  id: r1\n  Warm\n"));
        assert!(card.contains("  Ingredients: stock, salt, to taste\n"));
        assert!(card.ends_with("  | heat\n  | serve\n"));
    }

    #[test]
    fn test_changes_only_touch_given_fields() {
        let recipe = soup();
        let mut draft = EditDraft {
            id: recipe.id.clone(),
            fields: recipe.fields.clone(),
        };
        let changes = FieldChanges {
            cooking_time: Some(10),
            description: Some(String::new()),
            ..FieldChanges::default()
        };
        assert!(!changes.is_empty());

        changes.apply(&mut draft);

        assert_eq!(draft.fields.cooking_time, 10);
        assert_eq!(draft.fields.description, None);
        assert_eq!(draft.fields.title, "Soup");
        assert_eq!(draft.fields.ingredients, recipe.fields.ingredients);
    }
}
