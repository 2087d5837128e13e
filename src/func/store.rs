use super::FuncError;
use downcast_rs::{impl_downcast, DowncastSync};
use rand::rngs::StdRng;
use rand::SeedableRng;
use slab::Slab;
use std::any::{type_name, Any};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// A value that can be stored in a register of the function graph.
///
/// This is implemented for every `Debug + Send + Sync + 'static` type.
pub trait Datum: DowncastSync + fmt::Debug {
    /// The name of the concrete type of this value.
    fn datum_type_name(&self) -> &'static str;
}

impl<T: Any + Send + Sync + fmt::Debug> Datum for T {
    fn datum_type_name(&self) -> &'static str {
        type_name::<T>()
    }
}

impl_downcast!(sync Datum);

/// The identifier of a register of a [`Store`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegisterId(pub usize);

/// The identifier of a function of a [`Store`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FunctionId(pub usize);

/// A typed handle to a register holding a `T`.
pub struct Output<T> {
    register: RegisterId,
    _phantom: PhantomData<fn() -> T>,
}

impl<T> Clone for Output<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Output<T> {}

impl<T> PartialEq for Output<T> {
    fn eq(&self, other: &Self) -> bool {
        self.register == other.register
    }
}

impl<T> Eq for Output<T> {}

impl<T> fmt::Debug for Output<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Output<{}>({})", type_name::<T>(), self.register.0)
    }
}

impl<T: Datum> Output<T> {
    fn new(register: RegisterId) -> Self {
        Self {
            register,
            _phantom: PhantomData,
        }
    }

    /// The register this handle points to.
    #[inline]
    pub fn register(&self) -> RegisterId {
        self.register
    }

    /// Forgets the type of this handle.
    #[inline]
    pub fn erase(self) -> AnyOutput {
        AnyOutput {
            register: self.register,
            type_name: type_name::<T>(),
        }
    }
}

/// An untyped handle to a register.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AnyOutput {
    register: RegisterId,
    type_name: &'static str,
}

impl AnyOutput {
    /// The register this handle points to.
    #[inline]
    pub fn register(&self) -> RegisterId {
        self.register
    }

    /// The name of the type stored in the register.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Recovers the typed handle, if the register holds a `T`.
    pub fn downcast<T: Datum>(&self) -> Option<Output<T>> {
        (self.type_name == type_name::<T>()).then(|| Output::new(self.register))
    }

    /// Recovers the typed handle, failing with [`FuncError::TypeMismatch`] if the
    /// register doesn't hold a `T`.
    pub fn typed<T: Datum>(&self) -> Result<Output<T>, FuncError> {
        self.downcast().ok_or(FuncError::TypeMismatch {
            expected: type_name::<T>(),
            found: self.type_name,
        })
    }
}

impl<T: Datum> From<Output<T>> for AnyOutput {
    fn from(output: Output<T>) -> Self {
        output.erase()
    }
}

/// A register whose value is set from outside of the graph.
#[derive(Debug, PartialEq, Eq)]
pub struct Variable<T> {
    output: Output<T>,
}

impl<T> Clone for Variable<T> {
    fn clone(&self) -> Self {
        Self {
            output: self.output,
        }
    }
}

impl<T: Datum> Variable<T> {
    /// The handle used to read this variable, or to feed it to functions.
    #[inline]
    pub fn output(&self) -> Output<T> {
        self.output
    }
}

/// A node of the function graph.
///
/// `run` receives the current values of the input registers, in the order
/// they were given to [`Store::add_function`], and returns one value per
/// output register.
pub trait Function: Send {
    /// Computes the outputs of this function from its inputs.
    fn run(&mut self, inputs: &[Arc<dyn Datum>]) -> Result<Vec<Arc<dyn Datum>>, FuncError>;
}

impl<F> Function for F
where
    F: FnMut(&[Arc<dyn Datum>]) -> Result<Vec<Arc<dyn Datum>>, FuncError> + Send,
{
    fn run(&mut self, inputs: &[Arc<dyn Datum>]) -> Result<Vec<Arc<dyn Datum>>, FuncError> {
        self(inputs)
    }
}

/// Reads the `i`-th input of a function as a `T`.
pub fn input<T: Datum>(inputs: &[Arc<dyn Datum>], i: usize) -> Result<&T, FuncError> {
    let value = inputs.get(i).ok_or(FuncError::MissingInput(i))?;
    (**value)
        .downcast_ref::<T>()
        .ok_or_else(|| FuncError::TypeMismatch {
            expected: type_name::<T>(),
            found: (**value).datum_type_name(),
        })
}

struct RegisterSlot {
    value: Option<Arc<dyn Datum>>,
    dirty: bool,
    owner: Option<FunctionId>,
    type_name: &'static str,
    readers: Vec<FunctionId>,
}

impl RegisterSlot {
    // Freed with its owner, but still referenced by readers.
    fn is_freed(&self) -> bool {
        self.owner.is_none() && self.value.is_none()
    }
}

struct FunctionSlot {
    name: String,
    func: Box<dyn Function>,
    inputs: Vec<RegisterId>,
    outputs: Vec<RegisterId>,
    runs: usize,
}

/// The function graph: registers holding values, and the functions computing them.
///
/// Values are computed lazily. Reading a dirty register re-runs the function
/// owning it, after recursively bringing its inputs up to date. Setting a
/// [`Variable`] marks every register depending on it dirty.
///
/// Since a function can only read registers that exist when it is added,
/// the graph is always acyclic.
pub struct Store {
    registers: Slab<RegisterSlot>,
    functions: Slab<FunctionSlot>,
    rng: StdRng,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Store")
            .field("num_registers", &self.registers.len())
            .field("num_functions", &self.functions.len())
            .finish()
    }
}

impl Store {
    /// Creates an empty store whose random functions are seeded from system entropy.
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Creates an empty store whose random functions are seeded deterministically.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            registers: Slab::new(),
            functions: Slab::new(),
            rng,
        }
    }

    /// The random number generator used to seed random functions.
    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// The number of live registers.
    pub fn num_registers(&self) -> usize {
        self.registers.iter().filter(|(_, slot)| !slot.is_freed()).count()
    }

    /// The number of live functions.
    pub fn num_functions(&self) -> usize {
        self.functions.len()
    }

    /// Adds a register holding a value that never changes.
    pub fn constant<T: Datum>(&mut self, value: T) -> Output<T> {
        Output::new(self.insert_value(Arc::new(value), type_name::<T>()))
    }

    /// Adds a register whose value can be changed with [`Store::set`].
    pub fn variable<T: Datum>(&mut self, value: T) -> Variable<T> {
        Variable {
            output: Output::new(self.insert_value(Arc::new(value), type_name::<T>())),
        }
    }

    fn insert_value(&mut self, value: Arc<dyn Datum>, type_name: &'static str) -> RegisterId {
        RegisterId(self.registers.insert(RegisterSlot {
            value: Some(value),
            dirty: false,
            owner: None,
            type_name,
            readers: Vec::new(),
        }))
    }

    /// Replaces the value of a variable, and marks everything depending on it dirty.
    pub fn set<T: Datum>(&mut self, var: &Variable<T>, value: T) -> Result<(), FuncError> {
        let reg = var.output.register;
        let slot = self
            .registers
            .get_mut(reg.0)
            .ok_or(FuncError::MissingRegister(reg))?;
        slot.value = Some(Arc::new(value));
        self.mark_dependents_dirty(reg);
        Ok(())
    }

    fn mark_dependents_dirty(&mut self, reg: RegisterId) {
        let mut stack: Vec<FunctionId> = self
            .registers
            .get(reg.0)
            .map(|slot| slot.readers.clone())
            .unwrap_or_default();

        while let Some(fid) = stack.pop() {
            let Some(func) = self.functions.get(fid.0) else {
                continue;
            };
            for out in &func.outputs {
                if let Some(slot) = self.registers.get_mut(out.0) {
                    // A dirty register already has all its dependents dirty.
                    if !slot.dirty {
                        slot.dirty = true;
                        stack.extend_from_slice(&slot.readers);
                    }
                }
            }
        }
    }

    /// Adds a function reading the `inputs` registers and writing one new
    /// register per element of `output_types`.
    ///
    /// The function isn't run until one of its outputs is read.
    pub fn add_function(
        &mut self,
        name: impl Into<String>,
        inputs: &[RegisterId],
        output_types: &[&'static str],
        func: Box<dyn Function>,
    ) -> Result<(FunctionId, Vec<AnyOutput>), FuncError> {
        let is_missing = |reg: &&RegisterId| {
            self.registers
                .get(reg.0)
                .map_or(true, |slot| slot.is_freed())
        };
        if let Some(missing) = inputs.iter().find(is_missing) {
            return Err(FuncError::MissingRegister(*missing));
        }

        let fid = FunctionId(self.functions.vacant_key());
        let outputs: Vec<_> = output_types
            .iter()
            .map(|&type_name| AnyOutput {
                register: RegisterId(self.registers.insert(RegisterSlot {
                    value: None,
                    dirty: true,
                    owner: Some(fid),
                    type_name,
                    readers: Vec::new(),
                })),
                type_name,
            })
            .collect();

        for reg in inputs {
            self.registers[reg.0].readers.push(fid);
        }

        let name = name.into();
        log::debug!("adding function {} as {:?}", name, fid);
        let key = self.functions.insert(FunctionSlot {
            name,
            func,
            inputs: inputs.to_vec(),
            outputs: outputs.iter().map(|out| out.register).collect(),
            runs: 0,
        });
        debug_assert_eq!(key, fid.0);

        Ok((fid, outputs))
    }

    fn add_single_output<O: Datum>(
        &mut self,
        name: &str,
        inputs: &[RegisterId],
        func: Box<dyn Function>,
    ) -> Result<Output<O>, FuncError> {
        let (_, outputs) = self.add_function(name, inputs, &[type_name::<O>()], func)?;
        Ok(Output::new(outputs[0].register))
    }

    /// Adds a function computing one output from one input.
    pub fn map1<A, O, F>(&mut self, name: &str, a: Output<A>, mut f: F) -> Result<Output<O>, FuncError>
    where
        A: Datum,
        O: Datum,
        F: FnMut(&A) -> Result<O, FuncError> + Send + 'static,
    {
        let func = move |inputs: &[Arc<dyn Datum>]| -> Result<Vec<Arc<dyn Datum>>, FuncError> {
            let out = f(input(inputs, 0)?)?;
            Ok(vec![Arc::new(out) as Arc<dyn Datum>])
        };
        self.add_single_output(name, &[a.register], Box::new(func))
    }

    /// Adds a function computing one output from two inputs.
    pub fn map2<A, B, O, F>(
        &mut self,
        name: &str,
        a: Output<A>,
        b: Output<B>,
        mut f: F,
    ) -> Result<Output<O>, FuncError>
    where
        A: Datum,
        B: Datum,
        O: Datum,
        F: FnMut(&A, &B) -> Result<O, FuncError> + Send + 'static,
    {
        let func = move |inputs: &[Arc<dyn Datum>]| -> Result<Vec<Arc<dyn Datum>>, FuncError> {
            let out = f(input(inputs, 0)?, input(inputs, 1)?)?;
            Ok(vec![Arc::new(out) as Arc<dyn Datum>])
        };
        self.add_single_output(name, &[a.register, b.register], Box::new(func))
    }

    /// Adds a function computing one output from three inputs.
    pub fn map3<A, B, C, O, F>(
        &mut self,
        name: &str,
        a: Output<A>,
        b: Output<B>,
        c: Output<C>,
        mut f: F,
    ) -> Result<Output<O>, FuncError>
    where
        A: Datum,
        B: Datum,
        C: Datum,
        O: Datum,
        F: FnMut(&A, &B, &C) -> Result<O, FuncError> + Send + 'static,
    {
        let func = move |inputs: &[Arc<dyn Datum>]| -> Result<Vec<Arc<dyn Datum>>, FuncError> {
            let out = f(input(inputs, 0)?, input(inputs, 1)?, input(inputs, 2)?)?;
            Ok(vec![Arc::new(out) as Arc<dyn Datum>])
        };
        self.add_single_output(name, &[a.register, b.register, c.register], Box::new(func))
    }

    /// Removes a function and frees its output registers.
    ///
    /// Functions reading these registers are marked dirty and will fail with
    /// [`FuncError::MissingRegister`] when evaluated.
    pub fn remove_function(&mut self, fid: FunctionId) -> Result<(), FuncError> {
        if !self.functions.contains(fid.0) {
            return Err(FuncError::MissingFunction(fid));
        }

        let outputs = self.functions[fid.0].outputs.clone();
        for reg in &outputs {
            self.mark_dependents_dirty(*reg);
        }

        let slot = self.functions.remove(fid.0);
        for reg in &slot.inputs {
            if let Some(input) = self.registers.get_mut(reg.0) {
                input.readers.retain(|reader| *reader != fid);
                if input.is_freed() && input.readers.is_empty() {
                    let _ = self.registers.remove(reg.0);
                }
            }
        }
        for reg in &outputs {
            let Some(out) = self.registers.get_mut(reg.0) else {
                continue;
            };
            if out.readers.is_empty() {
                let _ = self.registers.remove(reg.0);
            } else {
                // Keep the slot until its readers are gone so its id isn't
                // handed to another function while they still refer to it.
                out.value = None;
                out.owner = None;
                out.dirty = true;
            }
        }

        log::debug!("removed function {} ({:?})", slot.name, fid);
        Ok(())
    }

    /// The number of times the function was run.
    pub fn run_count(&self, fid: FunctionId) -> usize {
        self.functions.get(fid.0).map(|f| f.runs).unwrap_or(0)
    }

    /// The name of the function.
    pub fn function_name(&self, fid: FunctionId) -> Option<&str> {
        self.functions.get(fid.0).map(|f| f.name.as_str())
    }

    /// The registers read by the function, in order.
    pub fn function_inputs(&self, fid: FunctionId) -> Option<&[RegisterId]> {
        self.functions.get(fid.0).map(|f| &f.inputs[..])
    }

    /// The registers written by the function, in order.
    pub fn function_outputs(&self, fid: FunctionId) -> Option<&[RegisterId]> {
        self.functions.get(fid.0).map(|f| &f.outputs[..])
    }

    /// The function writing the register, or `None` for constants, variables
    /// and missing registers.
    pub fn owner(&self, reg: RegisterId) -> Option<FunctionId> {
        self.registers.get(reg.0).and_then(|slot| slot.owner)
    }

    /// Checks if the register has to be recomputed before being read.
    pub fn is_dirty(&self, reg: RegisterId) -> Result<bool, FuncError> {
        self.registers
            .get(reg.0)
            .map(|slot| slot.dirty)
            .ok_or(FuncError::MissingRegister(reg))
    }

    /// The name of the type held by the register.
    pub fn register_type_name(&self, reg: RegisterId) -> Result<&'static str, FuncError> {
        self.registers
            .get(reg.0)
            .map(|slot| slot.type_name)
            .ok_or(FuncError::MissingRegister(reg))
    }

    /// Reads a register, evaluating whatever is needed to bring it up to date.
    pub fn get<T: Datum>(&mut self, output: Output<T>) -> Result<Arc<T>, FuncError> {
        let value = self.get_any(output.register)?;
        value.downcast_arc::<T>().map_err(|value| FuncError::TypeMismatch {
            expected: type_name::<T>(),
            found: (*value).datum_type_name(),
        })
    }

    /// Reads a register without knowing its type.
    pub fn get_any(&mut self, reg: RegisterId) -> Result<Arc<dyn Datum>, FuncError> {
        let slot = self
            .registers
            .get(reg.0)
            .ok_or(FuncError::MissingRegister(reg))?;

        if slot.dirty || slot.value.is_none() {
            let owner = slot.owner.ok_or(FuncError::MissingRegister(reg))?;
            self.run_function(owner)?;
        }

        self.registers
            .get(reg.0)
            .and_then(|slot| slot.value.clone())
            .ok_or(FuncError::MissingRegister(reg))
    }

    fn run_function(&mut self, fid: FunctionId) -> Result<(), FuncError> {
        let inputs = self
            .functions
            .get(fid.0)
            .ok_or(FuncError::MissingFunction(fid))?
            .inputs
            .clone();

        let mut values = Vec::with_capacity(inputs.len());
        for reg in inputs {
            values.push(self.get_any(reg)?);
        }

        let func = &mut self.functions[fid.0];
        log::trace!("running function {} ({:?})", func.name, fid);
        let results = func.func.run(&values).map_err(|err| FuncError::Evaluation {
            function: func.name.clone(),
            source: Box::new(err),
        })?;

        if results.len() != func.outputs.len() {
            return Err(FuncError::OutputCount {
                function: func.name.clone(),
                expected: func.outputs.len(),
                found: results.len(),
            });
        }

        // Every result is checked before any register is written.
        for (reg, value) in func.outputs.iter().zip(&results) {
            let expected = self.registers[reg.0].type_name;
            let found = (**value).datum_type_name();
            if found != expected {
                return Err(FuncError::Evaluation {
                    function: func.name.clone(),
                    source: Box::new(FuncError::TypeMismatch { expected, found }),
                });
            }
        }

        func.runs += 1;
        for (reg, value) in func.outputs.iter().zip(results) {
            let slot = &mut self.registers[reg.0];
            slot.value = Some(value);
            slot.dirty = false;
        }

        Ok(())
    }
}
