// Copyright 2025 Cowboy AI, LLC.

//! Leaf predicates over atoms, shared by the integration tests

#![allow(dead_code)]

use cim_category::{Category, CategoryContext, CategoryError, CategoryResult, Predicate};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Atom {
    pub index: usize,
    pub z: u32,
}

/// Atoms numbered in order with the given atomic numbers
pub fn chain(zs: &[u32]) -> Vec<Atom> {
    zs.iter()
        .enumerate()
        .map(|(index, &z)| Atom { index, z })
        .collect()
}

#[derive(Debug, PartialEq)]
pub struct AtomZ(pub u32);

impl Predicate<Atom> for AtomZ {
    fn name(&self) -> String {
        format!("Z={}", self.0)
    }

    fn matches(&self, atom: &Atom, _context: &CategoryContext) -> CategoryResult<bool> {
        Ok(atom.z == self.0)
    }
}

#[derive(Debug, PartialEq)]
pub struct AtomOdd;

impl Predicate<Atom> for AtomOdd {
    fn name(&self) -> String {
        "odd".to_string()
    }

    fn matches(&self, atom: &Atom, _context: &CategoryContext) -> CategoryResult<bool> {
        Ok(atom.index % 2 == 1)
    }
}

#[derive(Debug, PartialEq)]
pub struct AtomEven;

impl Predicate<Atom> for AtomEven {
    fn name(&self) -> String {
        "even".to_string()
    }

    fn matches(&self, atom: &Atom, _context: &CategoryContext) -> CategoryResult<bool> {
        Ok(atom.index % 2 == 0)
    }
}

/// Matches every atom
#[derive(Debug, PartialEq)]
pub struct Always;

impl Predicate<Atom> for Always {
    fn matches(&self, _atom: &Atom, _context: &CategoryContext) -> CategoryResult<bool> {
        Ok(true)
    }
}

/// Reads the atomic number to match from the `"z"` context parameter
#[derive(Debug, PartialEq)]
pub struct ContextZ;

impl Predicate<Atom> for ContextZ {
    fn matches(&self, atom: &Atom, context: &CategoryContext) -> CategoryResult<bool> {
        let z: u32 = context.require("z")?;
        Ok(atom.z == z)
    }
}

/// Refuses atoms beyond a cut-off index
#[derive(Debug, PartialEq)]
pub struct Bounded(pub usize);

impl Predicate<Atom> for Bounded {
    fn matches(&self, atom: &Atom, _context: &CategoryContext) -> CategoryResult<bool> {
        if atom.index >= self.0 {
            return Err(CategoryError::predicate_failed(
                "Bounded",
                format!("atom {} out of range", atom.index),
            ));
        }
        Ok(true)
    }
}

pub fn z(n: u32) -> Category<Atom> {
    Category::leaf(AtomZ(n))
}

pub fn odd() -> Category<Atom> {
    Category::leaf(AtomOdd)
}

pub fn even() -> Category<Atom> {
    Category::leaf(AtomEven)
}

pub fn always() -> Category<Atom> {
    Category::leaf(Always)
}
