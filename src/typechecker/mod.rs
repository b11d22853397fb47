//! Type checker for Sn.
//!
//! Walks the parsed module, assigning every expression its type and
//! validating statements against the enclosing function's return type.
//! The checker reports the first failure at each statement and keeps
//! going, so a single compilation surfaces as many problems as possible;
//! any error suppresses code generation.
mod error;
mod info;
mod typescope;
mod variabletype;

pub use self::error::TypeError;
pub use self::info::TypeInfo;
pub use self::typescope::TypeScope;
pub use self::variabletype::VariableType;

use crate::lexer::Literal;
use crate::parser::ast::{
    ArrayAccess, ArrayLiteral, Assignment, Ast, BinaryExpression, BinaryOperator, Block,
    CallExpression, Expression, ForLoop, FunctionDeclaration, IfStatement, InterpolatedString,
    InterpolationPart, LiteralExpression, ReturnStatement, Statement, StepExpression,
    UnaryExpression, UnaryOperator, Variable, VariableDeclaration, WhileLoop,
};

use self::typescope::setup_scope;

/// Result of type checking a node within the AST.
type TResult<T> = Result<T, TypeError>;

/// Struct for type checking an AST.
pub struct Typechecker {
    ast: Ast<()>,
    errors: Vec<TypeError>,
}

impl Typechecker {
    pub fn from_ast(ast: Ast<()>) -> Self {
        Self { ast, errors: vec![] }
    }

    /// Type check the contained AST and return the type correct AST with
    /// type information attached to each node.
    pub fn check(mut self) -> Result<Ast<TypeInfo>, Vec<TypeError>> {
        let nodes = self.ast.nodes();
        let file = self.ast.file().to_string();

        let mut scope = setup_scope();
        let mut statements = vec![];

        for node in nodes {
            match self.check_statement(&node, &mut scope, None) {
                Ok(statement) => statements.push(statement),
                Err(error) => self.errors.push(error),
            }
        }

        if self.errors.is_empty() {
            Ok(Ast::from_nodes(statements, file))
        } else {
            Err(self.errors)
        }
    }

    fn check_statement(
        &mut self,
        statement: &Statement<()>,
        scope: &mut TypeScope,
        enclosing_return: Option<&VariableType>,
    ) -> TResult<Statement<TypeInfo>> {
        Ok(match statement {
            Statement::Expression(expression) => {
                Statement::Expression(self.check_expression(expression, scope)?)
            }
            Statement::VariableDeclaration(declaration) => Statement::VariableDeclaration(
                self.check_variable_declaration(declaration, scope)?,
            ),
            Statement::Function(function) => {
                Statement::Function(self.check_function(function, scope)?)
            }
            Statement::Return(ret) => {
                Statement::Return(self.check_return(ret, scope, enclosing_return)?)
            }
            Statement::Block(block) => {
                Statement::Block(self.check_block(block, scope, enclosing_return))
            }
            Statement::If(if_statement) => {
                Statement::If(self.check_if(if_statement, scope, enclosing_return)?)
            }
            Statement::While(while_loop) => {
                Statement::While(self.check_while(while_loop, scope, enclosing_return)?)
            }
            Statement::For(for_loop) => {
                Statement::For(Box::new(self.check_for(for_loop, scope, enclosing_return)?))
            }
            Statement::Import(import) => Statement::Import(import.clone()),
        })
    }

    /// Check the statements of a block under a fresh scope. Failing
    /// statements are recorded and skipped so their siblings still get
    /// checked.
    fn check_block(
        &mut self,
        block: &Block<()>,
        scope: &mut TypeScope,
        enclosing_return: Option<&VariableType>,
    ) -> Block<TypeInfo> {
        scope.push();

        let mut statements = vec![];
        for statement in &block.statements {
            match self.check_statement(statement, scope, enclosing_return) {
                Ok(statement) => statements.push(statement),
                Err(error) => self.errors.push(error),
            }
        }

        scope.pop();

        Block {
            statements,
            position: block.position.clone(),
        }
    }

    fn check_variable_declaration(
        &mut self,
        declaration: &VariableDeclaration<()>,
        scope: &mut TypeScope,
    ) -> TResult<VariableDeclaration<TypeInfo>> {
        let declared = VariableType::from(&declaration.type_name);

        let initializer = match &declaration.initializer {
            Some(initializer) => {
                let initializer = self.check_expression(initializer, scope)?;
                let actual = initializer.info().ty;
                if actual != declared {
                    return Err(TypeError {
                        message: format!(
                            "Cannot initialize variable '{}' of type '{declared}' with a value of type '{actual}'",
                            declaration.name
                        ),
                        position: declaration.position.clone(),
                    });
                }
                Some(initializer)
            }
            None => None,
        };

        scope.set(&declaration.name, declared.clone());

        Ok(VariableDeclaration {
            name: declaration.name.clone(),
            type_name: declaration.type_name.clone(),
            initializer,
            info: TypeInfo::new(declared),
            position: declaration.position.clone(),
        })
    }

    fn check_function(
        &mut self,
        function: &FunctionDeclaration<()>,
        scope: &mut TypeScope,
    ) -> TResult<FunctionDeclaration<TypeInfo>> {
        if scope.contains_in_current_scope(&function.name) {
            return Err(TypeError {
                message: format!("Function '{}' has already been defined", function.name),
                position: function.position.clone(),
            });
        }

        let param_types: Vec<VariableType> = function
            .params
            .iter()
            .map(|param| VariableType::from(&param.type_name))
            .collect();
        let return_type = VariableType::from(&function.return_type);

        let function_type = VariableType::Func {
            params: param_types.clone(),
            return_type: Box::new(return_type.clone()),
        };

        // Registered before the body is checked so the function can call
        // itself.
        scope.set(&function.name, function_type.clone());

        scope.push();
        for (param, param_type) in function.params.iter().zip(&param_types) {
            scope.set(&param.name, param_type.clone());
        }
        let body = self.check_block(&function.body, scope, Some(&return_type));
        scope.pop();

        Ok(FunctionDeclaration {
            name: function.name.clone(),
            params: function.params.clone(),
            return_type: function.return_type.clone(),
            body,
            info: TypeInfo::new(function_type),
            position: function.position.clone(),
        })
    }

    fn check_return(
        &mut self,
        ret: &ReturnStatement<()>,
        scope: &mut TypeScope,
        enclosing_return: Option<&VariableType>,
    ) -> TResult<ReturnStatement<TypeInfo>> {
        let Some(expected) = enclosing_return else {
            return Err(TypeError {
                message: "Return outside of a function".to_string(),
                position: ret.position.clone(),
            });
        };

        let value = match &ret.value {
            Some(value) => {
                let value = self.check_expression(value, scope)?;
                let actual = value.info().ty;
                if actual != *expected {
                    return Err(TypeError {
                        message: format!(
                            "Expected return type '{expected}' but got '{actual}'"
                        ),
                        position: ret.position.clone(),
                    });
                }
                Some(value)
            }
            None => {
                if *expected != VariableType::Void {
                    return Err(TypeError {
                        message: format!(
                            "Missing return value in a function returning '{expected}'"
                        ),
                        position: ret.position.clone(),
                    });
                }
                None
            }
        };

        Ok(ReturnStatement {
            value,
            position: ret.position.clone(),
        })
    }

    fn check_if(
        &mut self,
        if_statement: &IfStatement<()>,
        scope: &mut TypeScope,
        enclosing_return: Option<&VariableType>,
    ) -> TResult<IfStatement<TypeInfo>> {
        let condition = self.check_expression(&if_statement.condition, scope)?;
        let condition_type = condition.info().ty;
        if condition_type != VariableType::Bool {
            return Err(TypeError {
                message: format!("Invalid type of condition '{condition_type}'"),
                position: if_statement.condition.position(),
            });
        }

        let then_block = self.check_block(&if_statement.then_block, scope, enclosing_return);
        let else_block = if_statement
            .else_block
            .as_ref()
            .map(|block| self.check_block(block, scope, enclosing_return));

        Ok(IfStatement {
            condition,
            then_block,
            else_block,
            position: if_statement.position.clone(),
        })
    }

    fn check_while(
        &mut self,
        while_loop: &WhileLoop<()>,
        scope: &mut TypeScope,
        enclosing_return: Option<&VariableType>,
    ) -> TResult<WhileLoop<TypeInfo>> {
        let condition = self.check_expression(&while_loop.condition, scope)?;
        let condition_type = condition.info().ty;
        if condition_type != VariableType::Bool {
            return Err(TypeError {
                message: format!("Invalid type of condition '{condition_type}'"),
                position: while_loop.condition.position(),
            });
        }

        let body = self.check_block(&while_loop.body, scope, enclosing_return);

        Ok(WhileLoop {
            condition,
            body,
            position: while_loop.position.clone(),
        })
    }

    fn check_for(
        &mut self,
        for_loop: &ForLoop<()>,
        scope: &mut TypeScope,
        enclosing_return: Option<&VariableType>,
    ) -> TResult<ForLoop<TypeInfo>> {
        // The initializer lives in its own scope wrapping the loop.
        scope.push();

        let result = (|this: &mut Self,
                       scope: &mut TypeScope|
         -> TResult<ForLoop<TypeInfo>> {
            let initializer = match &for_loop.initializer {
                Some(initializer) => {
                    Some(this.check_statement(initializer, scope, enclosing_return)?)
                }
                None => None,
            };

            let condition = match &for_loop.condition {
                Some(condition) => {
                    let condition = this.check_expression(condition, scope)?;
                    let condition_type = condition.info().ty;
                    if condition_type != VariableType::Bool {
                        return Err(TypeError {
                            message: format!("Invalid type of condition '{condition_type}'"),
                            position: condition.position(),
                        });
                    }
                    Some(condition)
                }
                None => None,
            };

            let increment = match &for_loop.increment {
                Some(increment) => Some(this.check_expression(increment, scope)?),
                None => None,
            };

            let body = this.check_block(&for_loop.body, scope, enclosing_return);

            Ok(ForLoop {
                initializer,
                condition,
                increment,
                body,
                position: for_loop.position.clone(),
            })
        })(self, scope);

        scope.pop();

        result
    }

    fn check_expression(
        &mut self,
        expression: &Expression<()>,
        scope: &mut TypeScope,
    ) -> TResult<Expression<TypeInfo>> {
        Ok(match expression {
            Expression::Literal(literal) => Expression::Literal(Self::check_literal(literal)),
            Expression::Variable(variable) => {
                Expression::Variable(self.check_variable(variable, scope)?)
            }
            Expression::Assign(assignment) => {
                Expression::Assign(Box::new(self.check_assignment(assignment, scope)?))
            }
            Expression::Binary(binary) => {
                Expression::Binary(Box::new(self.check_binary(binary, scope)?))
            }
            Expression::Unary(unary) => {
                Expression::Unary(Box::new(self.check_unary(unary, scope)?))
            }
            Expression::Call(call) => Expression::Call(Box::new(self.check_call(call, scope)?)),
            Expression::Array(array) => Expression::Array(self.check_array(array, scope)?),
            Expression::ArrayAccess(access) => {
                Expression::ArrayAccess(Box::new(self.check_array_access(access, scope)?))
            }
            Expression::Increment(step) => {
                Expression::Increment(Box::new(self.check_step(step, "++", scope)?))
            }
            Expression::Decrement(step) => {
                Expression::Decrement(Box::new(self.check_step(step, "--", scope)?))
            }
            Expression::Interpolated(interpolated) => {
                Expression::Interpolated(self.check_interpolated(interpolated, scope)?)
            }
        })
    }

    fn check_literal(literal: &LiteralExpression<()>) -> LiteralExpression<TypeInfo> {
        let ty = match &literal.value {
            Literal::Int(_) => VariableType::Int,
            Literal::Long(_) => VariableType::Long,
            Literal::Float(_) => VariableType::Double,
            Literal::Char(_) => VariableType::Char,
            Literal::Str(_) => VariableType::Str,
            Literal::Bool(_) => VariableType::Bool,
            Literal::Nil => VariableType::Nil,
        };

        LiteralExpression {
            value: literal.value.clone(),
            info: TypeInfo::new(ty),
            position: literal.position.clone(),
        }
    }

    fn check_variable(
        &mut self,
        variable: &Variable<()>,
        scope: &mut TypeScope,
    ) -> TResult<Variable<TypeInfo>> {
        match scope.find(&variable.name) {
            Some(ty) => Ok(Variable {
                name: variable.name.clone(),
                info: TypeInfo::new(ty),
                position: variable.position.clone(),
            }),
            None => Err(TypeError {
                message: format!("Undefined variable '{}'", variable.name),
                position: variable.position.clone(),
            }),
        }
    }

    fn check_assignment(
        &mut self,
        assignment: &Assignment<()>,
        scope: &mut TypeScope,
    ) -> TResult<Assignment<TypeInfo>> {
        let Some(variable_type) = scope.find(&assignment.name) else {
            return Err(TypeError {
                message: format!("Undefined variable '{}'", assignment.name),
                position: assignment.position.clone(),
            });
        };

        let value = self.check_expression(&assignment.value, scope)?;
        let value_type = value.info().ty;
        if value_type != variable_type {
            return Err(TypeError {
                message: format!(
                    "Cannot assign value of type '{value_type}' to variable '{}' of type '{variable_type}'",
                    assignment.name
                ),
                position: assignment.position.clone(),
            });
        }

        Ok(Assignment {
            name: assignment.name.clone(),
            value,
            info: TypeInfo::new(variable_type),
            position: assignment.position.clone(),
        })
    }

    fn check_binary(
        &mut self,
        binary: &BinaryExpression<()>,
        scope: &mut TypeScope,
    ) -> TResult<BinaryExpression<TypeInfo>> {
        let left = self.check_expression(&binary.left, scope)?;
        let right = self.check_expression(&binary.right, scope)?;
        let l_type = left.info().ty;
        let r_type = right.info().ty;

        let result_type = if binary.operator.is_logical() {
            if l_type != VariableType::Bool || r_type != VariableType::Bool {
                return Err(TypeError {
                    message: format!(
                        "Invalid types for binary operation '{}'. Got '{l_type}' and '{r_type}'",
                        binary.operator
                    ),
                    position: binary.position.clone(),
                });
            }
            VariableType::Bool
        } else if binary.operator.is_comparison() {
            if l_type != r_type {
                return Err(TypeError {
                    message: format!(
                        "Left and right value of binary operation do not match! ('{l_type}' and '{r_type}')"
                    ),
                    position: binary.position.clone(),
                });
            }
            let needs_numeric = !matches!(
                binary.operator,
                BinaryOperator::Equal | BinaryOperator::NotEqual
            );
            if needs_numeric && !l_type.is_numeric() {
                return Err(TypeError {
                    message: format!(
                        "Invalid types for binary operation '{}'. Got '{l_type}' and '{r_type}'",
                        binary.operator
                    ),
                    position: binary.position.clone(),
                });
            }
            VariableType::Bool
        } else {
            // Arithmetic; `+` additionally concatenates two strings.
            if binary.operator == BinaryOperator::Add
                && l_type == VariableType::Str
                && r_type == VariableType::Str
            {
                VariableType::Str
            } else {
                if l_type != r_type {
                    return Err(TypeError {
                        message: format!(
                            "Left and right value of binary operation do not match! ('{l_type}' and '{r_type}')"
                        ),
                        position: binary.position.clone(),
                    });
                }
                if !l_type.is_numeric() {
                    return Err(TypeError {
                        message: format!(
                            "Invalid types for binary operation '{}'. Got '{l_type}' and '{r_type}'",
                            binary.operator
                        ),
                        position: binary.position.clone(),
                    });
                }
                l_type
            }
        };

        Ok(BinaryExpression {
            operator: binary.operator,
            left,
            right,
            info: TypeInfo::new(result_type),
            position: binary.position.clone(),
        })
    }

    fn check_unary(
        &mut self,
        unary: &UnaryExpression<()>,
        scope: &mut TypeScope,
    ) -> TResult<UnaryExpression<TypeInfo>> {
        let operand = self.check_expression(&unary.operand, scope)?;
        let operand_type = operand.info().ty;

        match unary.operator {
            UnaryOperator::Negate if !operand_type.is_numeric() => {
                return Err(TypeError {
                    message: format!(
                        "Invalid type for numeric prefix operation '-'. Got '{operand_type}'"
                    ),
                    position: unary.position.clone(),
                });
            }
            UnaryOperator::Not if operand_type != VariableType::Bool => {
                return Err(TypeError {
                    message: format!(
                        "Invalid type for boolean prefix operation '!'. Got '{operand_type}'"
                    ),
                    position: unary.position.clone(),
                });
            }
            _ => {}
        }

        Ok(UnaryExpression {
            operator: unary.operator,
            operand,
            info: TypeInfo::new(operand_type),
            position: unary.position.clone(),
        })
    }

    fn check_step(
        &mut self,
        step: &StepExpression<()>,
        operator: &str,
        scope: &mut TypeScope,
    ) -> TResult<StepExpression<TypeInfo>> {
        let operand = self.check_expression(&step.operand, scope)?;
        let operand_type = operand.info().ty;

        if !operand_type.is_numeric() {
            return Err(TypeError {
                message: format!("'{operator}' requires a numeric operand, got '{operand_type}'"),
                position: step.position.clone(),
            });
        }

        Ok(StepExpression {
            operand,
            info: TypeInfo::new(operand_type),
            position: step.position.clone(),
        })
    }

    fn check_call(
        &mut self,
        call: &CallExpression<()>,
        scope: &mut TypeScope,
    ) -> TResult<CallExpression<TypeInfo>> {
        let Expression::Variable(callee) = &call.callee else {
            return Err(TypeError {
                message: "Unsupported call target; only named functions can be called".to_string(),
                position: call.position.clone(),
            });
        };

        // `print` accepts exactly one argument of any printable primitive
        // type.
        if callee.name == "print" {
            if call.args.len() != 1 {
                return Err(TypeError {
                    message: format!(
                        "print expects exactly one argument but got {}",
                        call.args.len()
                    ),
                    position: call.position.clone(),
                });
            }
            let arg = self.check_expression(&call.args[0], scope)?;
            let arg_type = arg.info().ty;
            if !arg_type.is_printable() {
                return Err(TypeError {
                    message: format!("print cannot render a value of type '{arg_type}'"),
                    position: arg.position(),
                });
            }

            let callee_type = VariableType::Func {
                params: vec![arg_type],
                return_type: Box::new(VariableType::Void),
            };
            return Ok(CallExpression {
                callee: Expression::Variable(Variable {
                    name: callee.name.clone(),
                    info: TypeInfo::new(callee_type),
                    position: callee.position.clone(),
                }),
                args: vec![arg],
                info: TypeInfo::new(VariableType::Void),
                position: call.position.clone(),
            });
        }

        let Some(callee_type) = scope.find(&callee.name) else {
            return Err(TypeError {
                message: format!("Call to undefined function '{}'", callee.name),
                position: call.position.clone(),
            });
        };

        let VariableType::Func {
            params,
            return_type,
        } = callee_type.clone()
        else {
            return Err(TypeError {
                message: format!("Trying to call an invalid function '{}'", callee.name),
                position: call.position.clone(),
            });
        };

        if params.len() != call.args.len() {
            return Err(TypeError {
                message: format!(
                    "Invalid amount of parameters! Expected {} but got {}",
                    params.len(),
                    call.args.len()
                ),
                position: call.position.clone(),
            });
        }

        let mut args = vec![];
        for (param, arg) in params.iter().zip(&call.args) {
            let arg = self.check_expression(arg, scope)?;
            let arg_type = arg.info().ty;
            if arg_type != *param {
                return Err(TypeError {
                    message: format!(
                        "Invalid type of parameter! Expected '{param}' but got '{arg_type}'"
                    ),
                    position: arg.position(),
                });
            }
            args.push(arg);
        }

        Ok(CallExpression {
            callee: Expression::Variable(Variable {
                name: callee.name.clone(),
                info: TypeInfo::new(callee_type),
                position: callee.position.clone(),
            }),
            args,
            info: TypeInfo::new(*return_type),
            position: call.position.clone(),
        })
    }

    fn check_array(
        &mut self,
        array: &ArrayLiteral<()>,
        scope: &mut TypeScope,
    ) -> TResult<ArrayLiteral<TypeInfo>> {
        let mut elements = vec![];
        for element in &array.elements {
            elements.push(self.check_expression(element, scope)?);
        }

        let Some(first) = elements.first() else {
            return Err(TypeError {
                message: "Cannot infer the type of an empty array".to_string(),
                position: array.position.clone(),
            });
        };
        let element_type = first.info().ty;

        for element in &elements {
            let ty = element.info().ty;
            if ty != element_type {
                return Err(TypeError {
                    message: format!(
                        "Mismatched array element types '{element_type}' and '{ty}'"
                    ),
                    position: element.position(),
                });
            }
        }

        Ok(ArrayLiteral {
            elements,
            info: TypeInfo::new(VariableType::Array(Box::new(element_type))),
            position: array.position.clone(),
        })
    }

    fn check_array_access(
        &mut self,
        access: &ArrayAccess<()>,
        scope: &mut TypeScope,
    ) -> TResult<ArrayAccess<TypeInfo>> {
        let array = self.check_expression(&access.array, scope)?;
        let index = self.check_expression(&access.index, scope)?;

        let VariableType::Array(element_type) = array.info().ty else {
            return Err(TypeError {
                message: format!("Cannot index a value of type '{}'", array.info().ty),
                position: access.position.clone(),
            });
        };

        let index_type = index.info().ty;
        if index_type != VariableType::Int {
            return Err(TypeError {
                message: format!("Array index must be 'int', got '{index_type}'"),
                position: index.position(),
            });
        }

        Ok(ArrayAccess {
            array,
            index,
            info: TypeInfo::new(*element_type),
            position: access.position.clone(),
        })
    }

    fn check_interpolated(
        &mut self,
        interpolated: &InterpolatedString<()>,
        scope: &mut TypeScope,
    ) -> TResult<InterpolatedString<TypeInfo>> {
        let mut parts = vec![];

        for part in &interpolated.parts {
            parts.push(match part {
                InterpolationPart::Fragment(fragment) => {
                    InterpolationPart::Fragment(fragment.clone())
                }
                InterpolationPart::Expression(expression) => {
                    let expression = self.check_expression(expression, scope)?;
                    let ty = expression.info().ty;
                    if !ty.is_printable() {
                        return Err(TypeError {
                            message: format!("Cannot interpolate value of type '{ty}'"),
                            position: expression.position(),
                        });
                    }
                    InterpolationPart::Expression(expression)
                }
            });
        }

        Ok(InterpolatedString {
            parts,
            info: TypeInfo::new(VariableType::Str),
            position: interpolated.position.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;
    use crate::parser::Parser;

    fn check_source(source: &str) -> Result<Ast<TypeInfo>, Vec<TypeError>> {
        let tokens = Lexer::new(source, "test.sn").lex();
        let ast = Parser::new(tokens, "test.sn")
            .parse()
            .expect("test source should parse");
        Typechecker::from_ast(ast).check()
    }

    #[test]
    fn test_factorial_checks() {
        let source =
            "fn factorial(n:int):int => if n <= 1 => return 1; return n * factorial(n - 1)\nfn main():void => print($\"{factorial(5)}\")\n";
        let ast = check_source(source).expect("factorial should type check");

        let Statement::Function(function) = &ast.nodes()[0] else {
            panic!("expected a function");
        };
        let Statement::Return(ret) = &function.body.statements[1] else {
            panic!("expected the trailing return");
        };
        let value = ret.value.as_ref().expect("return has a value");
        assert_eq!(VariableType::Int, value.info().ty);
    }

    #[test]
    fn test_undefined_variable() {
        let errors = check_source("fn f():int => return missing\n").unwrap_err();
        assert!(errors[0].message.contains("Undefined variable 'missing'"));
    }

    #[test]
    fn test_binary_operands_must_match() {
        let errors =
            check_source("fn f():void =>\n    var x:int = 1 + \"one\"\n").unwrap_err();
        assert!(errors[0].message.contains("do not match"));
    }

    #[test]
    fn test_string_concatenation_types() {
        let source = "fn f(a:str, b:str):str => return a + b\n";
        assert!(check_source(source).is_ok());
    }

    #[test]
    fn test_condition_must_be_bool() {
        let errors = check_source("fn f():void =>\n    if 1 => return\n").unwrap_err();
        assert!(errors[0].message.contains("Invalid type of condition"));
    }

    #[test]
    fn test_print_accepts_printable_primitives() {
        let source = "fn f():void =>\n    print(1)\n    print(1l)\n    print(2.5)\n    print('c')\n    print(\"s\")\n    print(true)\n";
        assert!(check_source(source).is_ok());
    }

    #[test]
    fn test_print_arity() {
        let errors = check_source("fn f():void => print(1, 2)\n").unwrap_err();
        assert!(errors[0].message.contains("exactly one argument"));
    }

    #[test]
    fn test_call_arity_mismatch() {
        let source = "fn add(a:int, b:int):int => return a + b\nfn f():int => return add(1)\n";
        let errors = check_source(source).unwrap_err();
        assert!(errors[0].message.contains("Expected 2 but got 1"));
    }

    #[test]
    fn test_call_argument_type_mismatch() {
        let source = "fn add(a:int, b:int):int => return a + b\nfn f():int => return add(1, \"x\")\n";
        let errors = check_source(source).unwrap_err();
        assert!(errors[0].message.contains("Expected 'int' but got 'str'"));
    }

    #[test]
    fn test_return_type_mismatch() {
        let errors = check_source("fn f():int => return \"x\"\n").unwrap_err();
        assert!(errors[0]
            .message
            .contains("Expected return type 'int' but got 'str'"));
    }

    #[test]
    fn test_bare_return_in_non_void_function() {
        let errors = check_source("fn f():int => return\n").unwrap_err();
        assert!(errors[0].message.contains("Missing return value"));
    }

    #[test]
    fn test_interpolation_rejects_unprintable() {
        let source = "fn f():void =>\n    var xs:int[] = [1]\n    print($\"{xs}\")\n";
        let errors = check_source(source).unwrap_err();
        assert!(errors[0].message.contains("Cannot interpolate"));
    }

    #[test]
    fn test_increment_requires_numeric() {
        let source = "fn f():void =>\n    var s:str = \"x\"\n    s++\n";
        let errors = check_source(source).unwrap_err();
        assert!(errors[0].message.contains("numeric operand"));
    }

    #[test]
    fn test_int_and_long_do_not_mix() {
        let errors = check_source("fn f():void =>\n    var x:int = 1 + 2l\n").unwrap_err();
        assert!(errors[0].message.contains("do not match"));
    }

    #[test]
    fn test_errors_accumulate_across_statements() {
        let source = "fn f():void =>\n    var x:int = \"a\"\n    var y:str = 1\n";
        let errors = check_source(source).unwrap_err();
        assert_eq!(2, errors.len());
    }

    #[test]
    fn test_shadowing_in_nested_block() {
        let source =
            "fn f():void =>\n    var x:int = 1\n    if true =>\n        var x:str = \"s\"\n        print(x)\n    print($\"{x}\")\n";
        assert!(check_source(source).is_ok());
    }

    #[test]
    fn test_every_expression_is_typed() {
        let source = "fn f(a:int):int =>\n    var b:int = a + 1\n    return b * 2\n";
        let ast = check_source(source).expect("should check");

        let Statement::Function(function) = &ast.nodes()[0] else {
            panic!("expected a function");
        };
        let Statement::VariableDeclaration(declaration) = &function.body.statements[0] else {
            panic!("expected a declaration");
        };
        let initializer = declaration.initializer.as_ref().unwrap();
        assert_eq!(VariableType::Int, initializer.info().ty);
    }
}
