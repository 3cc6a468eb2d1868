//! Prompt construction for the completion call.

use super::compact::CompactMenu;
use crate::Result;

/// Default completion budget for a menu answer.
pub const DEFAULT_MAX_TOKENS: u32 = 200;

/// Default sampling temperature for a menu answer.
pub const DEFAULT_TEMPERATURE: f32 = 0.5;

const INSTRUCTIONS: &str = "\
You are the digital waiter of the restaurant \"{restaurant}\".
Rules:
- Answer only questions about food, drinks and this menu. Politely decline anything else.
- Always answer in the same language the guest used.
- Keep the answer to 2-3 sentences.
- Recommend only dishes from the menu below.
- End with one final line of exactly this form, listing the ids of the dishes you recommend (possibly none):
RECOMMENDED_IDS: [id1,id2]

Menu format: {\"r\": restaurant, \"c\": [{\"n\": category, \"i\": [item, ...]}]}
Each item is [name, price in BGN, size, description, flags, id, preparation minutes].
Flags are letters: v = vegetarian, g = vegan, h = spicy, p = popular. No letter means the flag is not set.

Menu:
";

/// Build the system prompt embedding the compact menu.
pub fn system_prompt(menu: &CompactMenu) -> Result<String> {
    let mut prompt = INSTRUCTIONS.replace("{restaurant}", &menu.restaurant);
    prompt.push_str(&menu.to_json()?);
    Ok(prompt)
}
