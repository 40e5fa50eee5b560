//! GDScript declaration scanner.
//!
//! Finds `class_name` and `func` lines with plain regex matching, then hands
//! the comment block above each one to the extractor and annotation parser.
//! No attempt is made to validate the surrounding GDScript.

use crate::model::*;
use crate::parser::{annotation, comment};
use regex::Regex;
use std::sync::LazyLock;

static RE_CLASS_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*class_name\s+([A-Za-z0-9_]+)").unwrap());

static RE_FUNC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:static\s+)?func\s+([A-Za-z0-9_]+)\s*(\([^)]*\))\s*(?:->\s*([^:\s]+))?")
        .unwrap()
});

/// Scan one source file into a [`ScannedUnit`].
pub fn scan(path: &str, input: &str) -> ScannedUnit {
    let lines: Vec<&str> = input.lines().collect();
    let mut unit = ScannedUnit {
        path: path.to_string(),
        ..Default::default()
    };

    for (i, line) in lines.iter().enumerate() {
        if let Some(caps) = RE_CLASS_NAME.captures(line) {
            // A unit declares at most one type; keep the first
            if unit.declared_type.is_none() {
                unit.declared_type = Some(caps[1].to_string());
                unit.type_doc = comment::extract(&lines, i);
            }
            continue;
        }

        if let Some(caps) = RE_FUNC.captures(line) {
            let doc = comment::extract(&lines, i);
            unit.members.push(MemberRecord {
                name: caps[1].to_string(),
                signature: caps[2].to_string(),
                declared_return_type: caps.get(3).map(|m| m.as_str().to_string()),
                annotation: annotation::parse(&doc),
            });
        }
    }

    unit
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENEMY: &str = r#"extends CharacterBody2D
# Base enemy.
# Chases the player.
class_name Enemy

var hp := 10

# Apply damage.
# @param int amount the damage
# Returns: nothing happens if already dead
func take_damage(amount) -> void:
	hp -= amount

func _process(delta: float):
	pass

## Shared spawn helper.
static func spawn(scene: PackedScene) -> Enemy:
	return scene.instantiate()
"#;

    #[test]
    fn scans_class_name_and_doc() {
        let unit = scan("enemies/enemy.gd", ENEMY);
        assert_eq!(unit.path, "enemies/enemy.gd");
        assert_eq!(unit.declared_type.as_deref(), Some("Enemy"));
        assert_eq!(unit.type_doc, "Base enemy.\nChases the player.");
    }

    #[test]
    fn scans_members_in_order() {
        let unit = scan("enemies/enemy.gd", ENEMY);
        let names: Vec<&str> = unit.members.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["take_damage", "_process", "spawn"]);
    }

    #[test]
    fn captures_signature_and_return_type() {
        let unit = scan("enemies/enemy.gd", ENEMY);
        let take = &unit.members[0];
        assert_eq!(take.signature, "(amount)");
        assert_eq!(take.declared_return_type.as_deref(), Some("void"));

        let process = &unit.members[1];
        assert_eq!(process.signature, "(delta: float)");
        assert_eq!(process.declared_return_type, None);

        let spawn = &unit.members[2];
        assert_eq!(spawn.declared_return_type.as_deref(), Some("Enemy"));
        assert_eq!(spawn.annotation.summary, "Shared spawn helper.");
    }

    #[test]
    fn parses_member_annotation() {
        let unit = scan("enemies/enemy.gd", ENEMY);
        let ann = &unit.members[0].annotation;
        assert_eq!(ann.summary, "Apply damage.");
        assert_eq!(ann.params["amount"].ty.as_deref(), Some("int"));
        assert_eq!(ann.params["amount"].desc, "the damage");
        let ret = ann.returns.as_ref().unwrap();
        assert_eq!(ret.ty, None);
        assert_eq!(ret.desc, "nothing happens if already dead");
    }

    #[test]
    fn undocumented_member_has_empty_annotation() {
        let unit = scan("enemies/enemy.gd", ENEMY);
        assert_eq!(unit.members[1].annotation, ParsedAnnotation::default());
    }

    #[test]
    fn first_class_name_wins() {
        let unit = scan("x.gd", "class_name A\nclass_name B\n");
        assert_eq!(unit.declared_type.as_deref(), Some("A"));
    }

    #[test]
    fn file_without_declarations() {
        let unit = scan("util/consts.gd", "const MAX := 3\n");
        assert!(unit.declared_type.is_none());
        assert!(unit.type_doc.is_empty());
        assert!(unit.members.is_empty());
    }
}
