use nom::{
    branch::alt,
    bytes::complete::{is_not, tag},
    character::complete::{alpha1, alphanumeric1, char, multispace1},
    combinator::{opt, recognize, value},
    multi::many0,
    sequence::{delimited, pair, preceded, terminated},
    IResult,
};

/// One node in a tree source: a type name and its children.
#[derive(Debug, PartialEq, Eq)]
pub struct TreeDef<'src> {
    pub(crate) ty: &'src str,
    pub(crate) children: Vec<TreeDef<'src>>,
}

impl<'src> TreeDef<'src> {
    #[allow(dead_code)]
    pub(crate) fn new(ty: &'src str) -> Self {
        Self {
            ty,
            children: vec![],
        }
    }

    #[allow(dead_code)]
    pub(crate) fn new_with_children(ty: &'src str, children: Vec<TreeDef<'src>>) -> Self {
        Self { ty, children }
    }
}

/// A named tree, `tree <name> = <node>`.
#[derive(Debug, PartialEq, Eq)]
pub struct TreeRootDef<'src> {
    pub(crate) name: &'src str,
    pub(crate) root: TreeDef<'src>,
}

#[derive(Debug, PartialEq, Eq)]
pub struct TreeSource<'src> {
    pub tree_defs: Vec<TreeRootDef<'src>>,
}

impl<'src> TreeSource<'src> {
    pub fn find(&self, name: &str) -> Option<&TreeRootDef<'src>> {
        self.tree_defs.iter().find(|tree| tree.name == name)
    }
}

fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        alt((alpha1, tag("_"))),
        many0(alt((alphanumeric1, tag("_")))),
    ))(input)
}

fn line_comment(i: &str) -> IResult<&str, ()> {
    value((), pair(char('#'), opt(is_not("\n\r"))))(i)
}

/// Whitespace, newlines and comments, in any amount.
fn blank(i: &str) -> IResult<&str, ()> {
    value((), many0(alt((value((), multispace1), line_comment))))(i)
}

fn open_brace(i: &str) -> IResult<&str, ()> {
    value((), preceded(blank, char('{')))(i)
}

fn close_brace(i: &str) -> IResult<&str, ()> {
    value((), preceded(blank, char('}')))(i)
}

fn tree_node(i: &str) -> IResult<&str, TreeDef<'_>> {
    let (i, ty) = preceded(blank, identifier)(i)?;

    let (i, children) = opt(delimited(open_brace, many0(tree_node), close_brace))(i)?;

    Ok((
        i,
        TreeDef {
            ty,
            children: children.unwrap_or_default(),
        },
    ))
}

fn parse_tree(i: &str) -> IResult<&str, TreeRootDef<'_>> {
    let (i, _) = preceded(blank, terminated(tag("tree"), multispace1))(i)?;

    let (i, name) = identifier(i)?;

    let (i, _) = delimited(blank, char('='), blank)(i)?;

    let (i, root) = tree_node(i)?;

    Ok((i, TreeRootDef { name, root }))
}

/// Parses as many tree definitions as possible. The remainder is returned
/// untouched, so callers can tell whether the whole input was consumed.
pub fn parse_file(i: &str) -> IResult<&str, TreeSource<'_>> {
    let (i, tree_defs) = many0(parse_tree)(i)?;

    // Eat up trailing blanks to indicate that the input was thoroughly consumed
    let (i, _) = blank(i)?;

    Ok((i, TreeSource { tree_defs }))
}
