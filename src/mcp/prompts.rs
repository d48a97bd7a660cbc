//! Prompt templates served through `prompts/list` and `prompts/get`.

use serde_json::{json, Value};

use crate::types::{Error, Result};

pub const WEEKLY_MEAL_PLAN: &str = "weekly_meal_plan";

const WEEKLY_MEAL_PLAN_CONTEXT: &str = "\
<context>
You have access to a Mealie recipe database with various recipes. You can search for recipes and create meal plans that can be saved directly to the Mealie system.
</context>

<instructions>
# Meal Planning Guidelines
- Include breakfast, lunch, and dinner for all 7 days
- Create a variety of meals using different proteins, grains, and vegetables
- Consider seasonal ingredients
- Balance nutrition throughout the week
- Use recipes from the Mealie database when available

# Leftover Management
- Plan for leftovers where appropriate (e.g., making extra portions of dinner that can be used for lunch the next day)
- When planning leftovers, suggest how the leftover meal can be repurposed or enhanced

# Recipe Format
When suggesting recipes from the Mealie database, include the recipe ID or slug if available.

# User Feedback Process
After presenting the meal plan, ask the user for specific feedback about:
- Present the meal plan in table format
- Whether any meals should be swapped or adjusted
- If the leftover utilization works for their schedule
- Any additional dietary needs that weren't addressed

# Saving to Mealie
Once the user is satisfied with the meal plan:
1. Ask if they want to save it to their Mealie database
2. Provide a concise summary in table format
3. When saving to Mealie, use the recipe_id parameter for any Mealie recipes
</instructions>
";

const WEEKLY_MEAL_PLAN_REQUEST: &str = "I need help creating a balanced meal plan for the next \
week that includes breakfast, lunch, and dinner.";

/// `prompts/list` result.
pub fn list_prompts() -> Value {
    json!({
        "prompts": [{
            "name": WEEKLY_MEAL_PLAN,
            "description": "Generates a weekly meal plan template.",
            "arguments": [{
                "name": "preferences",
                "description": "Additional dietary preferences or constraints",
                "required": false,
            }],
        }]
    })
}

/// `prompts/get` result for `name`, filled with `arguments`.
pub fn get_prompt(name: &str, arguments: &Value) -> Result<Value> {
    match name {
        WEEKLY_MEAL_PLAN => {
            let preferences = arguments
                .get("preferences")
                .and_then(|v| v.as_str())
                .unwrap_or("");
            Ok(weekly_meal_plan(preferences))
        }
        _ => Err(Error::validation(format!("Unknown prompt: {}", name))),
    }
}

fn weekly_meal_plan(preferences: &str) -> Value {
    let mut request = WEEKLY_MEAL_PLAN_REQUEST.to_string();
    if !preferences.is_empty() {
        request.push_str(&format!(" My preferences are: {}", preferences));
    }

    json!({
        "description": "Generates a weekly meal plan template.",
        "messages": [
            {
                "role": "assistant",
                "content": {"type": "text", "text": WEEKLY_MEAL_PLAN_CONTEXT},
            },
            {
                "role": "user",
                "content": {"type": "text", "text": request},
            },
        ],
    })
}
