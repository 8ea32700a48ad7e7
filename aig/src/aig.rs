//! Combinational and-inverter graphs with named inputs and outputs.
use zwohash::HashMap;

use crate::lit::{Lit, Var};

/// Errors produced when constructing or transforming an [`Aig`].
#[derive(Debug, thiserror::Error)]
pub enum AigError {
    /// Two inputs would share the same name.
    #[error("duplicate input name `{0}`")]
    DuplicateInput(String),
    /// A single output circuit was required.
    #[error("expected a circuit with exactly one output, found {0}")]
    NotSingleOutput(usize),
}

/// Definition of an AIG node.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Node {
    /// The constant false node, always [`Var::FALSE`].
    False,
    /// A primary input, identified by its position in [`Aig::inputs`].
    Input(usize),
    /// A two input AND gate.
    And([Lit; 2]),
}

/// A combinational and-inverter graph.
///
/// Every node is identified by a [`Var`]. AND gates only refer to variables with a smaller index,
/// so the node list is always in topological order. New AND gates are constant folded and
/// structurally hashed, which makes building the same function twice from the same literals
/// return the same literal.
///
/// Inputs carry unique names, which is how circuits are combined and how quantified variables
/// are identified. Outputs carry names as well, but those need not be unique.
#[derive(Clone, Debug)]
pub struct Aig {
    nodes: Vec<Node>,
    inputs: Vec<(String, Var)>,
    input_index: HashMap<String, usize>,
    outputs: Vec<(String, Lit)>,
    strash: HashMap<[Lit; 2], Var>,
}

impl Default for Aig {
    fn default() -> Self {
        Self::new()
    }
}

impl Aig {
    /// Creates an empty AIG containing only the constant false node.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::False],
            inputs: vec![],
            input_index: Default::default(),
            outputs: vec![],
            strash: Default::default(),
        }
    }

    /// Number of nodes, including the constant false node.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the AIG contains no inputs and no gates.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Number of AND gates.
    pub fn and_count(&self) -> usize {
        self.nodes.len() - 1 - self.inputs.len()
    }

    /// Returns the definition of a node.
    pub fn node(&self, var: Var) -> Node {
        self.nodes[var.index()]
    }

    /// Returns the literal of the named input, creating the input if it does not exist yet.
    pub fn input(&mut self, name: &str) -> Lit {
        match self.find_input(name) {
            Some(lit) => lit,
            None => self.push_input(name.to_owned()),
        }
    }

    /// Adds a new input, failing if an input with the same name exists.
    pub fn try_add_input(&mut self, name: impl Into<String>) -> Result<Lit, AigError> {
        let name = name.into();
        if self.input_index.contains_key(&name) {
            return Err(AigError::DuplicateInput(name));
        }
        Ok(self.push_input(name))
    }

    fn push_input(&mut self, name: String) -> Lit {
        let var = Var::from_index(self.nodes.len());
        self.nodes.push(Node::Input(self.inputs.len()));
        self.input_index.insert(name.clone(), self.inputs.len());
        self.inputs.push((name, var));
        var.as_lit()
    }

    /// Returns the literal of the named input, if present.
    pub fn find_input(&self, name: &str) -> Option<Lit> {
        self.input_index
            .get(name)
            .map(|&index| self.inputs[index].1.as_lit())
    }

    /// Number of inputs.
    pub fn input_count(&self) -> usize {
        self.inputs.len()
    }

    /// Name of the input at the given position.
    pub fn input_name(&self, index: usize) -> &str {
        &self.inputs[index].0
    }

    /// Iterates over all inputs in creation order.
    pub fn inputs(&self) -> impl Iterator<Item = (&str, Lit)> + '_ {
        self.inputs
            .iter()
            .map(|(name, var)| (name.as_str(), var.as_lit()))
    }

    /// Iterates over all input names in creation order.
    pub fn input_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.inputs.iter().map(|(name, _)| name.as_str())
    }

    /// Returns a literal equivalent to the conjunction of `a` and `b`.
    pub fn and(&mut self, a: Lit, b: Lit) -> Lit {
        let [a, b] = if a <= b { [a, b] } else { [b, a] };

        if a == Lit::FALSE || a == !b {
            return Lit::FALSE;
        } else if a == Lit::TRUE || a == b {
            return b;
        }

        if let Some(&var) = self.strash.get(&[a, b]) {
            return var.as_lit();
        }

        let var = Var::from_index(self.nodes.len());
        self.nodes.push(Node::And([a, b]));
        self.strash.insert([a, b], var);
        var.as_lit()
    }

    /// Returns a literal equivalent to the disjunction of `a` and `b`.
    pub fn or(&mut self, a: Lit, b: Lit) -> Lit {
        !self.and(!a, !b)
    }

    /// Returns a literal equivalent to the exclusive or of `a` and `b`.
    pub fn xor(&mut self, a: Lit, b: Lit) -> Lit {
        let left = self.and(a, !b);
        let right = self.and(!a, b);
        self.or(left, right)
    }

    /// Returns a literal equivalent to `if cond { then } else { other }`.
    pub fn ite(&mut self, cond: Lit, then: Lit, other: Lit) -> Lit {
        let left = self.and(cond, then);
        let right = self.and(!cond, other);
        self.or(left, right)
    }

    /// Appends a named output.
    pub fn add_output(&mut self, name: impl Into<String>, lit: Lit) {
        self.outputs.push((name.into(), lit));
    }

    /// Replaces the literal driving the output at the given position.
    pub fn set_output(&mut self, index: usize, lit: Lit) {
        self.outputs[index].1 = lit;
    }

    /// Number of outputs.
    pub fn output_count(&self) -> usize {
        self.outputs.len()
    }

    /// Returns the name and literal of the output at the given position.
    pub fn output(&self, index: usize) -> (&str, Lit) {
        let (name, lit) = &self.outputs[index];
        (name, *lit)
    }

    /// Iterates over all outputs.
    pub fn outputs(&self) -> impl Iterator<Item = (&str, Lit)> + '_ {
        self.outputs.iter().map(|(name, lit)| (name.as_str(), *lit))
    }

    /// Returns a copy of this AIG with renamed inputs.
    ///
    /// The closure returns the new name of an input or `None` to keep the current name. The
    /// structure of the circuit and the order of the inputs are unchanged.
    pub fn rename_inputs(
        &self,
        mut rename: impl FnMut(&str) -> Option<String>,
    ) -> Result<Aig, AigError> {
        let mut renamed = self.clone();
        renamed.input_index.clear();
        for (index, (name, _)) in renamed.inputs.iter_mut().enumerate() {
            if let Some(new_name) = rename(name) {
                *name = new_name;
            }
            if renamed.input_index.insert(name.clone(), index).is_some() {
                return Err(AigError::DuplicateInput(name.clone()));
            }
        }
        Ok(renamed)
    }

    /// Marks every variable in the transitive fanin of the given roots.
    pub fn cone(&self, roots: impl IntoIterator<Item = Lit>) -> Vec<bool> {
        let mut in_cone = vec![false; self.nodes.len()];
        for root in roots {
            in_cone[root.var().index()] = true;
        }
        for index in (1..self.nodes.len()).rev() {
            if !in_cone[index] {
                continue;
            }
            if let Node::And(fanins) = self.nodes[index] {
                for fanin in fanins {
                    in_cone[fanin.var().index()] = true;
                }
            }
        }
        in_cone
    }

    /// Copies the fanin cones of `roots` from `source` into this AIG.
    ///
    /// Every input of `source` within the cones is replaced by the literal returned by
    /// `map_input`, which receives this AIG and the input's name. Returns the literals
    /// corresponding to `roots` in this AIG.
    pub fn import_cone(
        &mut self,
        source: &Aig,
        roots: &[Lit],
        mut map_input: impl FnMut(&mut Aig, &str) -> Lit,
    ) -> Vec<Lit> {
        let in_cone = source.cone(roots.iter().copied());
        let mut map: Vec<Lit> = vec![Lit::FALSE; source.nodes.len()];

        for (index, &node) in source.nodes.iter().enumerate() {
            if !in_cone[index] {
                continue;
            }
            map[index] = match node {
                Node::False => Lit::FALSE,
                Node::Input(input) => map_input(self, &source.inputs[input].0),
                Node::And([a, b]) => {
                    let a = a.lookup(|var| map[var.index()]);
                    let b = b.lookup(|var| map[var.index()]);
                    self.and(a, b)
                }
            };
        }

        roots
            .iter()
            .map(|root| root.lookup(|var| map[var.index()]))
            .collect()
    }

    /// Rebuilds the output cones through the structurally hashing builder.
    ///
    /// This removes gates that no output depends on, propagates constants and merges
    /// structurally equivalent gates. All inputs are kept, in their original order, even if no
    /// output depends on them.
    pub fn cleanup(&self) -> Aig {
        let mut cleaned = Aig::new();
        for (name, _) in &self.inputs {
            cleaned.input(name);
        }
        let roots: Vec<Lit> = self.outputs.iter().map(|&(_, lit)| lit).collect();
        let mapped = cleaned.import_cone(self, &roots, |target, name| target.input(name));
        for ((name, _), lit) in self.outputs.iter().zip(mapped) {
            cleaned.add_output(name.clone(), lit);
        }
        log::trace!(
            "cleanup: {} -> {} and gates",
            self.and_count(),
            cleaned.and_count()
        );
        cleaned
    }

    /// Evaluates all outputs under the given input assignment.
    pub fn evaluate(&self, mut assignment: impl FnMut(&str) -> bool) -> Vec<bool> {
        let mut values = vec![false; self.nodes.len()];
        for (index, &node) in self.nodes.iter().enumerate() {
            values[index] = match node {
                Node::False => false,
                Node::Input(input) => assignment(&self.inputs[input].0),
                Node::And([a, b]) => {
                    a.lookup(|var| values[var.index()]) && b.lookup(|var| values[var.index()])
                }
            };
        }
        self.outputs
            .iter()
            .map(|&(_, lit)| lit.lookup(|var| values[var.index()]))
            .collect()
    }
}
