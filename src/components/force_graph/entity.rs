//! Entity categories and their fixed color palette.

/// Fill, border and display name for one entity category.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EntityStyle {
	pub bg: &'static str,
	pub border: &'static str,
	pub text: &'static str,
}

/// Closed set of entity categories the backend emits.
///
/// Anything unrecognized parses to [`EntityType::Other`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityType {
	Symbol,
	Character,
	Emotion,
	Theme,
	Location,
	Archetype,
	Person,
	Action,
	Object,
	PersonalMeaning,
	SelfFigure,
	Entity,
	Other,
}

impl EntityType {
	#[cfg(test)]
	pub const ALL: [EntityType; 13] = [
		EntityType::Symbol,
		EntityType::Character,
		EntityType::Emotion,
		EntityType::Theme,
		EntityType::Location,
		EntityType::Archetype,
		EntityType::Person,
		EntityType::Action,
		EntityType::Object,
		EntityType::PersonalMeaning,
		EntityType::SelfFigure,
		EntityType::Entity,
		EntityType::Other,
	];

	/// Parses a raw backend type string, ignoring case and underscores.
	pub fn from_raw(raw: &str) -> Self {
		let normalized: String = raw
			.chars()
			.filter(|c| *c != '_')
			.flat_map(char::to_lowercase)
			.collect();
		match normalized.as_str() {
			"symbol" => EntityType::Symbol,
			"character" => EntityType::Character,
			"emotion" => EntityType::Emotion,
			"theme" => EntityType::Theme,
			"location" => EntityType::Location,
			"archetype" => EntityType::Archetype,
			"person" => EntityType::Person,
			"action" => EntityType::Action,
			"object" => EntityType::Object,
			"personalmeaning" => EntityType::PersonalMeaning,
			"self" => EntityType::SelfFigure,
			"entity" => EntityType::Entity,
			_ => EntityType::Other,
		}
	}

	/// Stable lowercase key, written to the `data-type` attribute of type chips.
	pub fn key(self) -> &'static str {
		match self {
			EntityType::Symbol => "symbol",
			EntityType::Character => "character",
			EntityType::Emotion => "emotion",
			EntityType::Theme => "theme",
			EntityType::Location => "location",
			EntityType::Archetype => "archetype",
			EntityType::Person => "person",
			EntityType::Action => "action",
			EntityType::Object => "object",
			EntityType::PersonalMeaning => "personalmeaning",
			EntityType::SelfFigure => "self",
			EntityType::Entity => "entity",
			EntityType::Other => "default",
		}
	}

	pub fn style(self) -> EntityStyle {
		let (bg, border, text) = match self {
			EntityType::Symbol => ("#a78bfa", "#8b5cf6", "Symbol"),
			EntityType::Character => ("#34d399", "#10b981", "Character"),
			EntityType::Emotion => ("#fbbf24", "#f59e0b", "Emotion"),
			EntityType::Theme => ("#60a5fa", "#3b82f6", "Theme"),
			EntityType::Location => ("#f472b6", "#ec4899", "Location"),
			EntityType::Archetype => ("#22d3ee", "#06b6d4", "Archetype"),
			EntityType::Person => ("#34d399", "#10b981", "Person"),
			EntityType::Action => ("#fb923c", "#f97316", "Action"),
			EntityType::Object => ("#c084fc", "#a855f7", "Object"),
			EntityType::PersonalMeaning => ("#f87171", "#ef4444", "Personal"),
			EntityType::SelfFigure => ("#2dd4bf", "#14b8a6", "Self"),
			EntityType::Entity => ("#94a3b8", "#6b7280", "Entity"),
			EntityType::Other => ("#9ca3af", "#6b7280", "Other"),
		};
		EntityStyle { bg, border, text }
	}
}

/// Appends a two-digit hex alpha to a `#rrggbb` color.
pub fn with_alpha(hex: &str, alpha: &str) -> String {
	format!("{hex}{alpha}")
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parsing_ignores_case_and_underscores() {
		assert_eq!(EntityType::from_raw("SYMBOL"), EntityType::Symbol);
		assert_eq!(
			EntityType::from_raw("Personal_Meaning"),
			EntityType::PersonalMeaning
		);
		assert_eq!(EntityType::from_raw("self"), EntityType::SelfFigure);
		assert_eq!(EntityType::from_raw("__theme__"), EntityType::Theme);
	}

	#[test]
	fn unknown_types_fall_back_to_gray() {
		let ty = EntityType::from_raw("spaceship");
		assert_eq!(ty, EntityType::Other);
		assert_eq!(ty.style().bg, "#9ca3af");
		assert_eq!(ty.style().text, "Other");
	}

	#[test]
	fn keys_round_trip_through_parser() {
		for ty in EntityType::ALL {
			if ty == EntityType::Other {
				continue;
			}
			assert_eq!(EntityType::from_raw(ty.key()), ty);
		}
	}

	#[test]
	fn alpha_suffix() {
		assert_eq!(with_alpha("#a78bfa", "40"), "#a78bfa40");
	}
}
