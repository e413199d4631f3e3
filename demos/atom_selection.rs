// Copyright 2025 Cowboy AI, LLC.

//! Selecting atoms of a small molecule with composed categories
//!
//! This example demonstrates:
//! - Writing leaf predicates with parameter-aware equality
//! - Composing them with `&`, `^` and a directly constructed OR
//! - Reading back which category matched each atom
//! - Passing evaluation parameters through a context

use cim_category::{
    Category, CategoryContext, CategoryResult, CompositeCategory, NullCategory, Predicate,
};
use serde_json::json;

#[derive(Debug, Clone, Copy)]
struct Atom {
    index: usize,
    z: u32,
}

// Match a fixed atomic number
#[derive(Debug, PartialEq)]
struct AtomZ(u32);

impl Predicate<Atom> for AtomZ {
    fn name(&self) -> String {
        format!("Z={}", self.0)
    }

    fn matches(&self, atom: &Atom, _context: &CategoryContext) -> CategoryResult<bool> {
        Ok(atom.z == self.0)
    }
}

// Match atoms whose index is below the `"limit"` context parameter
#[derive(Debug, PartialEq)]
struct Leading;

impl Predicate<Atom> for Leading {
    fn matches(&self, atom: &Atom, context: &CategoryContext) -> CategoryResult<bool> {
        let limit: usize = context.require("limit")?;
        Ok(atom.index < limit)
    }
}

fn main() -> CategoryResult<()> {
    // ethanol heavy atoms followed by its hydrogens
    let atoms: Vec<Atom> = [6, 6, 8, 1, 1, 1, 1, 1, 1]
        .iter()
        .enumerate()
        .map(|(index, &z)| Atom { index, z })
        .collect();

    let carbon: Category<Atom> = Category::leaf(AtomZ(6));
    let oxygen: Category<Atom> = Category::leaf(AtomZ(8));
    let leading: Category<Atom> = Category::leaf(Leading);

    let heavy: Category<Atom> = CompositeCategory::or(carbon.clone(), oxygen.clone()).into();
    heavy.set_name("heavy");
    let selection = &heavy ^ &leading;

    let context = CategoryContext::new().with_parameter("limit", json!(4));
    let results = selection.categorize_all(&atoms, &context)?;

    println!("Selection: {}", selection);
    for (atom, category) in atoms.iter().zip(&results) {
        let verdict = if *category == NullCategory { "-" } else { "selected" };
        println!("  atom {:>2} (Z={}): {:<10} {}", atom.index, atom.z, category, verdict);
    }

    let carbons = carbon.eq_each(&heavy.categorize_all(&atoms, &context)?);
    println!(
        "Carbon atoms: {:?}",
        carbons
            .iter()
            .enumerate()
            .filter_map(|(i, is_carbon)| is_carbon.then_some(i))
            .collect::<Vec<_>>()
    );

    Ok(())
}
