use anyhow::{Context, Result};
use recipebox_core::{RecipeApi, RecipeInput};
use std::collections::HashSet;

struct SeedRecipe {
    title: &'static str,
    description: Option<&'static str>,
    ingredients: &'static [&'static str],
    instructions: &'static str,
    cuisine_type: &'static str,
    cooking_time: u32,
}

const SAMPLE_RECIPES: &[SeedRecipe] = &[
    SeedRecipe {
        title: "Classic Spaghetti Carbonara",
        description: Some("A rich and creamy Italian pasta dish with eggs, cheese, and pancetta."),
        ingredients: &[
            "400 g spaghetti",
            "200 g pancetta or guanciale",
            "4 large eggs",
            "100 g Pecorino Romano, freshly grated",
            "2 tsp black pepper, freshly ground",
        ],
        instructions: "1. Cook spaghetti in salted water until al dente.
2. Fry the pancetta until crispy.
3. Whisk eggs, Pecorino Romano and black pepper.
4. Toss hot pasta with pancetta off the heat, then stir in the egg mixture.
5. Loosen with pasta water and serve immediately.",
        cuisine_type: "Italian",
        cooking_time: 25,
    },
    SeedRecipe {
        title: "Chicken Tikka Masala",
        description: Some("Tender chicken pieces in a creamy, spiced tomato sauce."),
        ingredients: &[
            "800 g chicken thighs, boneless",
            "1 cup yogurt",
            "2 tbsp garam masala",
            "2 large onions, diced",
            "4 cloves garlic, minced",
            "400 g tomato puree",
            "1 cup heavy cream",
        ],
        instructions: "1. Marinate chicken in yogurt and garam masala for 2 hours.
2. Grill the chicken until charred.
3. Soften onions and garlic, add tomato puree and cream, simmer 15 minutes.
4. Add the chicken and simmer 10 minutes more.",
        cuisine_type: "Indian",
        cooking_time: 45,
    },
    SeedRecipe {
        title: "Fish Tacos",
        description: None,
        ingredients: &[
            "500 g white fish fillets",
            "8 corn tortillas",
            "2 cups shredded cabbage",
            "1 lime",
            "1/2 cup sour cream",
        ],
        instructions: "1. Season and pan-fry the fish.
2. Warm the tortillas.
3. Fill with fish and cabbage, top with sour cream and a squeeze of lime.",
        cuisine_type: "Mexican",
        cooking_time: 20,
    },
    SeedRecipe {
        title: "Mushroom Risotto",
        description: Some("Creamy arborio rice slowly cooked with mushrooms and parmesan."),
        ingredients: &[
            "300 g arborio rice",
            "250 g mushrooms, sliced",
            "1 l vegetable stock, hot",
            "1/2 cup white wine",
            "50 g parmesan, grated",
        ],
        instructions: "1. Saute the mushrooms and set aside.
2. Toast the rice, deglaze with wine.
3. Add stock a ladle at a time, stirring, until the rice is tender.
4. Fold in mushrooms and parmesan.",
        cuisine_type: "Italian",
        cooking_time: 40,
    },
    SeedRecipe {
        title: "Overnight Oats",
        description: Some("No-cook breakfast prepared the night before."),
        ingredients: &[
            "1/2 cup rolled oats",
            "1/2 cup milk",
            "1/4 cup yogurt",
            "1 tbsp honey",
        ],
        instructions: "1. Stir everything together in a jar.
2. Refrigerate overnight.",
        cuisine_type: "American",
        cooking_time: 5,
    },
];

impl SeedRecipe {
    fn to_input(&self) -> RecipeInput {
        RecipeInput {
            title: Some(self.title.to_string()),
            description: self.description.map(str::to_string),
            ingredients: Some(self.ingredients.iter().map(|i| i.to_string()).collect()),
            instructions: Some(self.instructions.to_string()),
            cuisine_type: Some(self.cuisine_type.to_string()),
            cooking_time: Some(self.cooking_time),
        }
    }
}

/// Create the sample recipes. Titles already on the server are skipped,
/// so running this twice does not duplicate anything.
pub async fn seed<A: RecipeApi + ?Sized>(api: &A) -> Result<usize> {
    let existing: HashSet<String> = api
        .list()
        .await
        .context("Failed to list existing recipes")?
        .into_iter()
        .map(|r| r.fields.title)
        .collect();

    println!("Creating {} sample recipes...", SAMPLE_RECIPES.len());

    let mut created = 0;
    for recipe in SAMPLE_RECIPES {
        if existing.contains(recipe.title) {
            println!("  Skipped (already exists): {}", recipe.title);
            continue;
        }

        let fields = recipe
            .to_input()
            .validate()
            .with_context(|| format!("Invalid sample recipe: {}", recipe.title))?;

        api.create(&fields)
            .await
            .with_context(|| format!("Failed to create recipe: {}", recipe.title))?;

        println!("  Created: {}", recipe.title);
        created += 1;
    }

    println!();
    println!("{}", "=".repeat(50));
    println!("SEED DATA COMPLETE ({} created)", created);
    println!("{}", "=".repeat(50));

    Ok(created)
}
