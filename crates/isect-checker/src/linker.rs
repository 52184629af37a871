//! Inheritance linking.
//!
//! Linking a set of parsed files runs in phases:
//!
//! 1. validate every declared type; a class with an invalid type is not
//!    registered
//! 2. register classes, then `class_alias` calls, into a [`ClassHierarchy`]
//! 3. check that classes extend classes and implement interfaces
//! 4. check every method and property against the same-named member of each
//!    ancestor that declares one
//!
//! Override checks see the whole hierarchy, so a parent declared in a later
//! file is fine. `self` and `parent` are resolved against the class that
//! wrote them before two signatures are compared.

use crate::declaration_validator::validate_declaration;
use crate::diagnostics::{
    Location, declaration_error, declaration_warning, incompatible_override, missing_parameter,
    undecidable_override,
};
use crate::options::CheckerOptions;
use crate::variance::{
    ConformanceResult, DeclarationSite, MemberRef, SiteSlot, VarianceViolation, check_override,
};
use isect_common::diagnostics::diagnostic_codes;
use isect_common::{Diagnostic, Span};
use isect_parser::{ClassDecl, MethodDecl, ModifierFlags, Param, ParamFlags, PropertyDecl, SourceFile, TypeNode};
use isect_solver::{
    BuiltinType, ClassEntry, ClassHierarchy, ClassKind, ClassRelationOracle, HierarchyError,
    MemoizedOracle, Name, SubtypeChecker, SubtypeError, TypeExpression, render,
};
use rustc_hash::FxHashMap;
use tracing::{debug, debug_span, info_span, trace};

/// One parsed file.
#[derive(Clone, Debug)]
pub struct SourceUnit {
    pub path: String,
    pub file: SourceFile,
}

impl SourceUnit {
    pub fn new(path: impl Into<String>, file: SourceFile) -> Self {
        Self {
            path: path.into(),
            file,
        }
    }
}

/// Result of linking: the findings, sorted by file and offset, and the
/// hierarchy that was built.
#[derive(Debug)]
pub struct LinkOutcome {
    pub diagnostics: Vec<Diagnostic>,
    pub hierarchy: ClassHierarchy,
}

impl LinkOutcome {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }
}

/// A registered class together with the file it came from.
#[derive(Clone, Copy)]
struct LinkedClass<'u> {
    path: &'u str,
    decl: &'u ClassDecl,
}

impl<'u> LinkedClass<'u> {
    fn at(&self, span: Span) -> Location<'u> {
        Location {
            file: self.path,
            span,
        }
    }
}

/// Why an override was rejected.
enum Conflict {
    Incompatible(Option<Box<VarianceViolation>>),
    /// One-based position of the base parameter with no counterpart.
    MissingParameter(usize),
}

pub struct Linker {
    options: CheckerOptions,
}

impl Default for Linker {
    fn default() -> Self {
        Self::new(CheckerOptions::default())
    }
}

impl Linker {
    pub fn new(options: CheckerOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &CheckerOptions {
        &self.options
    }

    pub fn link(&self, units: &[SourceUnit]) -> LinkOutcome {
        let _span = info_span!("link", files = units.len()).entered();
        let mut diagnostics = Vec::new();
        let mut hierarchy = ClassHierarchy::new();
        let mut linked: Vec<LinkedClass<'_>> = Vec::new();

        for unit in units {
            for decl in &unit.file.classes {
                let class = LinkedClass {
                    path: &unit.path,
                    decl,
                };
                if !self.validate_class(class, &mut diagnostics) {
                    debug!(class = %decl.name, "not registered: invalid declared type");
                    continue;
                }
                match hierarchy.declare(class_entry(decl)) {
                    Ok(()) => linked.push(class),
                    Err(err) => {
                        diagnostics.push(registration_diagnostic(class, &err, &hierarchy, &linked));
                    }
                }
            }
        }

        for unit in units {
            for alias in &unit.file.aliases {
                if let Err(HierarchyError::DuplicateAlias { alias: name }) =
                    hierarchy.alias(&alias.original, &alias.alias)
                {
                    diagnostics.push(Diagnostic::from_code(
                        unit.path.clone(),
                        alias.span.start,
                        alias.span.len(),
                        diagnostic_codes::DUPLICATE_CLASS_ALIAS,
                        &[name.as_str()],
                    ));
                }
            }
        }

        for class in &linked {
            check_heritage(*class, &hierarchy, &mut diagnostics);
        }

        {
            let by_name: FxHashMap<&Name, LinkedClass<'_>> =
                linked.iter().map(|class| (&class.decl.name, *class)).collect();
            let oracle = MemoizedOracle::new(&hierarchy);
            let mut checker = SubtypeChecker::new(&oracle)
                .with_policy(self.options.unresolved_policy)
                .with_profile(self.options.subtype_profile());

            for class in &linked {
                check_class_overrides(*class, &hierarchy, &by_name, &mut checker, &mut diagnostics);
            }
            debug!(queries = oracle.cached_queries(), "relation queries answered");
        }

        diagnostics.sort_by(|a, b| {
            (a.file.as_str(), a.start, a.code).cmp(&(b.file.as_str(), b.start, b.code))
        });
        LinkOutcome {
            diagnostics,
            hierarchy,
        }
    }

    /// Validate every declared type of a class. Returns false if any is invalid.
    fn validate_class(&self, class: LinkedClass<'_>, diagnostics: &mut Vec<Diagnostic>) -> bool {
        let mut valid = true;
        let mut visit = |symbol: &MemberRef, node: &TypeNode| {
            let report = validate_declaration(&node.expr);
            let symbol = symbol.to_string();
            for error in &report.errors {
                diagnostics.push(declaration_error(class.path, node.span, &symbol, error));
            }
            if self.options.lint_callable_members {
                for warning in &report.warnings {
                    diagnostics.push(declaration_warning(class.path, node.span, &symbol, warning));
                }
            }
            valid &= report.is_valid();
        };

        let name = &class.decl.name;
        for method in class.decl.methods() {
            let symbol = MemberRef::method(name, &method.name);
            for node in method.params.iter().filter_map(|p| p.ty.as_ref()) {
                visit(&symbol, node);
            }
            if let Some(node) = &method.return_type {
                visit(&symbol, node);
            }
        }
        for property in class.decl.properties() {
            if let Some(node) = &property.ty {
                visit(&MemberRef::property(name, &property.name), node);
            }
        }
        valid
    }
}

fn class_entry(decl: &ClassDecl) -> ClassEntry {
    let mut entry = ClassEntry {
        name: decl.name.clone(),
        kind: decl.kind,
        parent: None,
        interfaces: Vec::new(),
    };
    match decl.kind {
        ClassKind::Class => {
            entry.parent = decl.extends.first().map(|r| r.name.clone());
            entry.interfaces = decl.implements.iter().map(|r| r.name.clone()).collect();
        }
        ClassKind::Interface => {
            entry.interfaces = decl.extends.iter().map(|r| r.name.clone()).collect();
        }
    }
    entry
}

fn registration_diagnostic(
    class: LinkedClass<'_>,
    error: &HierarchyError,
    hierarchy: &ClassHierarchy,
    linked: &[LinkedClass<'_>],
) -> Diagnostic {
    let decl = class.decl;
    let span = decl.name_span;
    let file = class.path.to_string();
    match error {
        HierarchyError::InheritanceCycle { name } => {
            let culprit = decl
                .extends
                .iter()
                .chain(&decl.implements)
                .find(|sup| sup.name == *name || hierarchy.ancestors(&sup.name).missing.contains(name))
                .or_else(|| decl.extends.first());
            let culprit = culprit.map_or("", |sup| sup.name.as_str());
            Diagnostic::from_code(
                file,
                span.start,
                span.len(),
                diagnostic_codes::INHERITANCE_CYCLE,
                &[name.as_str(), culprit],
            )
        }
        HierarchyError::DuplicateClass { name } | HierarchyError::DuplicateAlias { alias: name } => {
            let diagnostic = Diagnostic::from_code(
                file,
                span.start,
                span.len(),
                diagnostic_codes::DUPLICATE_CLASS_DECLARATION,
                &[name.as_str()],
            );
            match linked.iter().find(|c| c.decl.name == *name) {
                Some(first) => diagnostic.with_related(
                    first.path.to_string(),
                    first.decl.name_span.start,
                    first.decl.name_span.len(),
                    format!("{name} was first declared here"),
                ),
                None => diagnostic,
            }
        }
    }
}

fn kind_title(kind: ClassKind) -> &'static str {
    match kind {
        ClassKind::Class => "Class",
        ClassKind::Interface => "Interface",
    }
}

/// Classes extend a class and implement interfaces; interfaces extend
/// interfaces. Names that are not declared are left to the override checks.
fn check_heritage(class: LinkedClass<'_>, hierarchy: &ClassHierarchy, diagnostics: &mut Vec<Diagnostic>) {
    let decl = class.decl;
    let subject = format!("{} {}", kind_title(decl.kind), decl.name);
    let mut report = |span: Span, verb: &str, object: String| {
        diagnostics.push(Diagnostic::from_code(
            class.path.to_string(),
            span.start,
            span.len(),
            diagnostic_codes::INVALID_HERITAGE_CLAUSE,
            &[subject.as_str(), verb, object.as_str()],
        ));
    };

    let (extends_kind, implements_kind) = match decl.kind {
        ClassKind::Class => (ClassKind::Class, ClassKind::Interface),
        ClassKind::Interface => (ClassKind::Interface, ClassKind::Interface),
    };
    for sup in &decl.extends {
        if let Some(kind) = hierarchy.kind_of(&sup.name)
            && kind != extends_kind
        {
            report(sup.span, "extend", format!("{} {}", kind.label(), sup.name));
        }
    }
    for sup in &decl.implements {
        if let Some(kind) = hierarchy.kind_of(&sup.name)
            && kind != implements_kind
        {
            report(sup.span, "implement", format!("{} {}", kind.label(), sup.name));
        }
    }
}

fn check_class_overrides<O: ClassRelationOracle + ?Sized>(
    class: LinkedClass<'_>,
    hierarchy: &ClassHierarchy,
    by_name: &FxHashMap<&Name, LinkedClass<'_>>,
    checker: &mut SubtypeChecker<'_, O>,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let decl = class.decl;
    let _span = debug_span!("link_class", class = %decl.name).entered();
    let walk = hierarchy.ancestors(&decl.name);
    if !walk.missing.is_empty() {
        debug!(missing = ?walk.missing, "ancestors not available");
    }

    for entry in &walk.ancestors {
        let Some(base) = by_name.get(&entry.name).copied() else {
            continue;
        };
        trace!(base = %base.decl.name, "checking overrides");

        for method in decl.methods() {
            let Some(base_method) = base.decl.method(&method.name) else {
                continue;
            };
            if base_method.modifiers.is_private() || exempt_constructor(base, base_method) {
                continue;
            }
            if let Some(diagnostic) = check_method(class, method, base, base_method, checker) {
                diagnostics.push(diagnostic);
            }
        }

        for property in decl.properties() {
            let Some(base_property) = base.decl.property(&property.name) else {
                continue;
            };
            if base_property.modifiers.is_private() {
                continue;
            }
            if let Some(diagnostic) = check_property(class, property, base, base_property, checker) {
                diagnostics.push(diagnostic);
            }
        }
    }
}

/// Constructors only have to agree with abstract or interface constructors.
fn exempt_constructor(base: LinkedClass<'_>, method: &MethodDecl) -> bool {
    method.name.is("__construct")
        && base.decl.kind == ClassKind::Class
        && !method.modifiers.contains(ModifierFlags::ABSTRACT)
}

fn check_method<O: ClassRelationOracle + ?Sized>(
    class: LinkedClass<'_>,
    method: &MethodDecl,
    base: LinkedClass<'_>,
    base_method: &MethodDecl,
    checker: &mut SubtypeChecker<'_, O>,
) -> Option<Diagnostic> {
    let derived_at = class.at(method.name_span);
    let base_at = base.at(base_method.name_span);
    let derived_sig = method_signature(&class.decl.name, method);
    let base_sig = method_signature(&base.decl.name, base_method);

    let conflict = match method_conflict(class, method, base, base_method, checker) {
        Ok(conflict) => conflict?,
        Err(err) => {
            debug!(%derived_sig, %base_sig, error = %err, "override check undecided");
            return Some(undecidable_override(derived_at, &derived_sig, &base_sig, &err));
        }
    };
    debug!(%derived_sig, %base_sig, "incompatible override");
    Some(match conflict {
        Conflict::Incompatible(violation) => {
            incompatible_override(derived_at, base_at, &derived_sig, &base_sig, violation.as_deref())
        }
        Conflict::MissingParameter(position) => {
            missing_parameter(derived_at, base_at, &derived_sig, &base_sig, position)
        }
    })
}

/// The two methods of one override, named for the variance checker.
struct OverridePair<'u> {
    base: LinkedClass<'u>,
    derived: LinkedClass<'u>,
    base_owner: MemberRef,
    derived_owner: MemberRef,
}

impl OverridePair<'_> {
    fn compare<O: ClassRelationOracle + ?Sized>(
        &self,
        slot: SiteSlot,
        base_ty: Option<&TypeNode>,
        derived_ty: Option<&TypeNode>,
        checker: &mut SubtypeChecker<'_, O>,
    ) -> Result<Option<Conflict>, SubtypeError> {
        let base_ty = base_ty.map(|node| resolve_relative(&node.expr, self.base.decl, false));
        let late_static = base_ty.as_ref().is_none_or(|ty| !mentions_static(ty));
        let derived_ty =
            derived_ty.map(|node| resolve_relative(&node.expr, self.derived.decl, late_static));
        let result = check_override(
            &DeclarationSite {
                owner: self.base_owner.clone(),
                slot: slot.clone(),
                ty: base_ty.as_ref(),
            },
            &DeclarationSite {
                owner: self.derived_owner.clone(),
                slot,
                ty: derived_ty.as_ref(),
            },
            checker,
        )?;
        Ok(match result {
            ConformanceResult::Conforms => None,
            ConformanceResult::Violation(violation) => Some(Conflict::Incompatible(Some(violation))),
        })
    }
}

fn method_conflict<O: ClassRelationOracle + ?Sized>(
    class: LinkedClass<'_>,
    method: &MethodDecl,
    base: LinkedClass<'_>,
    base_method: &MethodDecl,
    checker: &mut SubtypeChecker<'_, O>,
) -> Result<Option<Conflict>, SubtypeError> {
    let pair = OverridePair {
        base,
        derived: class,
        base_owner: MemberRef::method(&base.decl.name, &base_method.name),
        derived_owner: MemberRef::method(&class.decl.name, &method.name),
    };

    if let Some(conflict) = pair.compare(
        SiteSlot::Return,
        base_method.return_type.as_ref(),
        method.return_type.as_ref(),
        checker,
    )? {
        return Ok(Some(conflict));
    }
    if base_method.returns_by_ref && !method.returns_by_ref {
        return Ok(Some(Conflict::Incompatible(None)));
    }

    let derived_variadic = method.params.last().filter(|p| p.is_variadic());
    for (index, base_param) in base_method.params.iter().enumerate() {
        let Some(param) = method.params.get(index).or(derived_variadic) else {
            return Ok(Some(Conflict::MissingParameter(index + 1)));
        };
        let shape_mismatch = (base_param.is_optional() && !param.is_optional())
            || (base_param.is_variadic() && !param.is_variadic())
            || base_param.flags.contains(ParamFlags::BY_REF) != param.flags.contains(ParamFlags::BY_REF);
        if shape_mismatch {
            return Ok(Some(Conflict::Incompatible(None)));
        }
        let slot = SiteSlot::Parameter {
            index,
            name: param.name.clone(),
        };
        if let Some(conflict) = pair.compare(slot, base_param.ty.as_ref(), param.ty.as_ref(), checker)? {
            return Ok(Some(conflict));
        }
    }

    if method
        .params
        .iter()
        .skip(base_method.params.len())
        .any(|p| !p.is_optional())
    {
        return Ok(Some(Conflict::Incompatible(None)));
    }
    Ok(None)
}

fn check_property<O: ClassRelationOracle + ?Sized>(
    class: LinkedClass<'_>,
    property: &PropertyDecl,
    base: LinkedClass<'_>,
    base_property: &PropertyDecl,
    checker: &mut SubtypeChecker<'_, O>,
) -> Option<Diagnostic> {
    let base_ty = base_property
        .ty
        .as_ref()
        .map(|node| resolve_relative(&node.expr, base.decl, false));
    let derived_ty = property
        .ty
        .as_ref()
        .map(|node| resolve_relative(&node.expr, class.decl, false));
    let derived_sig = property_signature(&class.decl.name, property);
    let base_sig = property_signature(&base.decl.name, base_property);
    let derived_at = class.at(property.span);

    let result = check_override(
        &DeclarationSite {
            owner: MemberRef::property(&base.decl.name, &base_property.name),
            slot: SiteSlot::Property,
            ty: base_ty.as_ref(),
        },
        &DeclarationSite {
            owner: MemberRef::property(&class.decl.name, &property.name),
            slot: SiteSlot::Property,
            ty: derived_ty.as_ref(),
        },
        checker,
    );
    match result {
        Ok(ConformanceResult::Conforms) => None,
        Ok(ConformanceResult::Violation(violation)) => Some(incompatible_override(
            derived_at,
            base.at(base_property.span),
            &derived_sig,
            &base_sig,
            Some(&*violation),
        )),
        Err(err) => Some(undecidable_override(derived_at, &derived_sig, &base_sig, &err)),
    }
}

/// Replace `self` and `parent` with the classes they denote inside `owner`.
/// With `late_static`, `static` becomes `owner` as well.
fn resolve_relative(ty: &TypeExpression, owner: &ClassDecl, late_static: bool) -> TypeExpression {
    match ty {
        TypeExpression::Named(name) => {
            let resolved = match BuiltinType::from_name(name) {
                Some(BuiltinType::SelfType) => Some(&owner.name),
                Some(BuiltinType::Static) if late_static => Some(&owner.name),
                Some(BuiltinType::Parent) if owner.kind == ClassKind::Class => {
                    owner.extends.first().map(|r| &r.name)
                }
                _ => None,
            };
            TypeExpression::Named(resolved.unwrap_or(name).clone())
        }
        TypeExpression::Nullable(inner) => {
            TypeExpression::Nullable(Box::new(resolve_relative(inner, owner, late_static)))
        }
        TypeExpression::Union(members) => TypeExpression::Union(
            members
                .iter()
                .map(|m| resolve_relative(m, owner, late_static))
                .collect(),
        ),
        TypeExpression::Intersection(members) => TypeExpression::Intersection(
            members
                .iter()
                .map(|m| resolve_relative(m, owner, late_static))
                .collect(),
        ),
    }
}

fn mentions_static(ty: &TypeExpression) -> bool {
    match ty {
        TypeExpression::Named(name) => BuiltinType::from_name(name) == Some(BuiltinType::Static),
        TypeExpression::Nullable(inner) => mentions_static(inner),
        TypeExpression::Union(members) | TypeExpression::Intersection(members) => {
            members.iter().any(mentions_static)
        }
    }
}

/// `Child::foo(A&B $x = ..., int ...$rest): C`
pub fn method_signature(class: &Name, method: &MethodDecl) -> String {
    let params: Vec<String> = method.params.iter().map(param_signature).collect();
    let mut signature = format!(
        "{class}::{}{}({})",
        if method.returns_by_ref { "&" } else { "" },
        method.name,
        params.join(", ")
    );
    if let Some(ty) = &method.return_type {
        signature.push_str(": ");
        signature.push_str(&render(&ty.expr));
    }
    signature
}

fn param_signature(param: &Param) -> String {
    let mut out = String::new();
    if let Some(ty) = &param.ty {
        out.push_str(&render(&ty.expr));
        out.push(' ');
    }
    if param.flags.contains(ParamFlags::BY_REF) {
        out.push('&');
    }
    if param.is_variadic() {
        out.push_str("...");
    }
    out.push('$');
    out.push_str(&param.name);
    if param.flags.contains(ParamFlags::HAS_DEFAULT) {
        out.push_str(" = ...");
    }
    out
}

/// `A&B Child::$prop`
pub fn property_signature(class: &Name, property: &PropertyDecl) -> String {
    match &property.ty {
        Some(ty) => format!("{} {class}::${}", render(&ty.expr), property.name),
        None => format!("{class}::${}", property.name),
    }
}
